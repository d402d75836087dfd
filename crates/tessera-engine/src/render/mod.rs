//! GPU command recording.
//!
//! One pipeline, one pass, one draw per frame. Geometry arrives in clip
//! space; the pass viewport maps it onto the surface.

mod ctx;
mod pass;
mod pipeline;

pub use ctx::{RenderCtx, RenderTarget};
pub use pass::{record, FramePass};
pub use pipeline::PipelineCache;
