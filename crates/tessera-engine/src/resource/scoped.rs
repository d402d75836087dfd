use std::ops::{Deref, DerefMut};

use super::{ResourceKind, ResourceLedger};

/// Explicit release hook run when a [`Scoped`] value is dropped.
pub trait Release {
    fn release(&mut self) {}
}

impl Release for wgpu::Buffer {
    fn release(&mut self) {
        self.destroy();
    }
}

impl Release for wgpu::RenderPipeline {}

/// A GPU object registered with a [`ResourceLedger`] for its whole lifetime.
pub struct Scoped<T: Release> {
    value: T,
    kind: ResourceKind,
    ledger: ResourceLedger,
}

impl<T: Release> Scoped<T> {
    pub fn new(value: T, kind: ResourceKind, ledger: &ResourceLedger) -> Self {
        ledger.acquire(kind);
        log::trace!("acquired {kind}");
        Self {
            value,
            kind,
            ledger: ledger.clone(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl<T: Release> Deref for Scoped<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Release> DerefMut for Scoped<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Release> Drop for Scoped<T> {
    fn drop(&mut self) {
        self.value.release();
        self.ledger.release(self.kind);
        log::trace!("released {}", self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Probe(Rc<Cell<u32>>);

    impl Release for Probe {
        fn release(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn drop_releases_and_balances_ledger() {
        let ledger = ResourceLedger::new();
        let released = Rc::new(Cell::new(0));

        {
            let scoped = Scoped::new(Probe(released.clone()), ResourceKind::VertexBuffer, &ledger);
            assert_eq!(scoped.kind(), ResourceKind::VertexBuffer);
            assert_eq!(ledger.outstanding(ResourceKind::VertexBuffer), 1);
        }

        assert_eq!(released.get(), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn early_return_paths_still_release() {
        fn build(ledger: &ResourceLedger, fail: bool) -> Result<Scoped<Probe>, &'static str> {
            let released = Rc::new(Cell::new(0));
            let buffer = Scoped::new(Probe(released), ResourceKind::IndexBuffer, ledger);
            if fail {
                return Err("upload failed");
            }
            Ok(buffer)
        }

        let ledger = ResourceLedger::new();
        assert!(build(&ledger, true).is_err());
        assert!(ledger.is_empty());

        let kept = build(&ledger, false);
        assert_eq!(ledger.outstanding(ResourceKind::IndexBuffer), 1);
        drop(kept);
        assert!(ledger.is_empty());
    }
}
