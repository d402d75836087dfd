//! Input subsystem.
//!
//! Public API does not expose winit types; the runtime translates platform
//! events through [`translate_window_event`].

mod platform;
mod state;
mod types;

pub use platform::translate_window_event;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
