//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! drives the frame loop from redraw requests.

mod host;
mod runtime;

pub use runtime::{Runtime, SessionConfig, DEFAULT_TITLE};
