//! Shader build pipeline.
//!
//! Two steps, mirroring a classic compile/link split:
//! - [`compile_shader`] runs the WGSL front-end and validator for one stage
//! - [`link_program`] pairs a vertex and a fragment stage and checks their interface
//!
//! Neither step fails the caller. Status flags and bounded diagnostic logs are
//! recorded on the returned objects; [`ShaderObject::error`] and
//! [`ShaderProgram::error`] turn them into [`PipelineError`](crate::error::PipelineError)s
//! for reporting.

mod compile;
pub(crate) mod info_log;
mod interface;
mod link;
mod source;

pub use compile::{compile_shader, ShaderObject};
pub use info_log::INFO_LOG_CAPACITY;
pub use interface::{InterfaceSlot, SlotType, StageInterface};
pub use link::{link_program, ShaderProgram, StageModule};
pub use source::{ShaderSource, ShaderStage};
