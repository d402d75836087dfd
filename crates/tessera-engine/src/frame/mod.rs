//! Frame loop state machine.
//!
//! [`FrameLoop`] is platform-free; it talks to the window and GPU only
//! through [`FrameHost`].

mod frame_loop;
mod host;

pub use frame_loop::{FrameLoop, FrameState};
pub use host::FrameHost;
