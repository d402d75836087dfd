use std::fmt;

use crate::shader::ShaderStage;

/// Failure taxonomy of the build pipeline.
///
/// Context and entry-point failures abort startup. Compile and link failures
/// are reported and the session keeps running with the defective program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The window or its GPU surface could not be created.
    ContextCreationFailed(String),
    /// No adapter/device could be resolved for the surface.
    EntryPointResolutionFailed(String),
    ShaderCompileFailed { stage: ShaderStage, log: String },
    ProgramLinkFailed { log: String },
}

impl PipelineError {
    /// Returns `true` for errors that must stop startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::ContextCreationFailed(_) | PipelineError::EntryPointResolutionFailed(_)
        )
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::ContextCreationFailed(msg) => {
                write!(f, "failed to create graphics context: {msg}")
            }
            PipelineError::EntryPointResolutionFailed(msg) => {
                write!(f, "failed to resolve graphics device: {msg}")
            }
            PipelineError::ShaderCompileFailed { stage, log } => {
                write!(f, "{stage} shader compilation failed\n{log}")
            }
            PipelineError::ProgramLinkFailed { log } => {
                write!(f, "shader program linking failed\n{log}")
            }
        }
    }
}

impl std::error::Error for PipelineError {}
