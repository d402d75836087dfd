use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Categories of GPU objects a session owns.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ResourceKind {
    VertexArray,
    VertexBuffer,
    IndexBuffer,
    Program,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::VertexArray => "vertex array",
            ResourceKind::VertexBuffer => "vertex buffer",
            ResourceKind::IndexBuffer => "index buffer",
            ResourceKind::Program => "program",
        })
    }
}

/// Live-object counts per [`ResourceKind`].
///
/// Cloning shares the same counters. Single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    live: Rc<RefCell<BTreeMap<ResourceKind, usize>>>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn acquire(&self, kind: ResourceKind) {
        *self.live.borrow_mut().entry(kind).or_insert(0) += 1;
    }

    pub(crate) fn release(&self, kind: ResourceKind) {
        let mut live = self.live.borrow_mut();
        match live.get_mut(&kind) {
            Some(n) if *n > 0 => *n -= 1,
            _ => log::warn!("released a {kind} the ledger never saw"),
        }
    }

    /// Number of live objects of `kind`.
    pub fn outstanding(&self, kind: ResourceKind) -> usize {
        self.live.borrow().get(&kind).copied().unwrap_or(0)
    }

    /// Kinds with live objects, in a stable order.
    pub fn leaks(&self) -> Vec<(ResourceKind, usize)> {
        self.live
            .borrow()
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(k, n)| (*k, *n))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.leaks().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_kind() {
        let ledger = ResourceLedger::new();
        ledger.acquire(ResourceKind::VertexBuffer);
        ledger.acquire(ResourceKind::VertexBuffer);
        ledger.acquire(ResourceKind::Program);

        assert_eq!(ledger.outstanding(ResourceKind::VertexBuffer), 2);
        assert_eq!(ledger.outstanding(ResourceKind::IndexBuffer), 0);
        assert_eq!(
            ledger.leaks(),
            vec![(ResourceKind::VertexBuffer, 2), (ResourceKind::Program, 1)]
        );

        ledger.release(ResourceKind::VertexBuffer);
        ledger.release(ResourceKind::VertexBuffer);
        ledger.release(ResourceKind::Program);
        assert!(ledger.is_empty());
    }

    #[test]
    fn clones_share_counters() {
        let a = ResourceLedger::new();
        let b = a.clone();
        a.acquire(ResourceKind::VertexArray);
        assert_eq!(b.outstanding(ResourceKind::VertexArray), 1);
    }

    #[test]
    fn unbalanced_release_does_not_underflow() {
        let ledger = ResourceLedger::new();
        ledger.release(ResourceKind::IndexBuffer);
        assert_eq!(ledger.outstanding(ResourceKind::IndexBuffer), 0);
    }
}
