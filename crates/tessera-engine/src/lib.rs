//! Tessera engine crate.
//!
//! A minimal real-time rasterization pipeline: one window, one shader
//! program, one vertex array and one draw per frame.
//!
//! Startup order: window + surface ([`device`]), shader compile/link
//! ([`shader`]), geometry upload ([`geometry`]), then the [`frame`] loop.
//! Everything GPU-side is owned by a [`session::RenderSession`] and released
//! through [`resource`] scopes on exit.

pub mod coords;
pub mod device;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod resource;
pub mod session;
pub mod shader;
pub mod window;

pub use error::PipelineError;
pub use session::{RenderSession, SceneDesc};
pub use window::{Runtime, SessionConfig};
pub use wgpu::PolygonMode;

/// Runs `scene` in a default 800x600 window.
pub fn run(scene: SceneDesc) -> anyhow::Result<()> {
    Runtime::run(SessionConfig::default(), scene)
}
