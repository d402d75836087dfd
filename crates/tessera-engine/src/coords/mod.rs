//! Small value types shared by the device, render and frame layers.
//!
//! - [`Viewport`]: physical-pixel rectangle, origin top-left
//! - [`ColorRgba`]: clear color

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
