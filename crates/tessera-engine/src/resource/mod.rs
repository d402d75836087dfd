//! Scoped ownership of GPU objects.
//!
//! Every GPU object owned by a render session is wrapped in [`Scoped`], which
//! releases it on drop (on every exit path, including failed startup) and
//! keeps a per-kind count in a shared [`ResourceLedger`]. At shutdown the
//! ledger must read zero; anything else is a leak.

mod ledger;
mod scoped;

pub use ledger::{ResourceKind, ResourceLedger};
pub use scoped::{Release, Scoped};
