use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::PipelineError;

use super::info_log;
use super::interface::{self, StageInterface};
use super::source::{ShaderSource, ShaderStage};

/// A single compiled (or failed) shader stage.
///
/// Produced by [`compile_shader`] and consumed by
/// [`link_program`](super::link_program). It is never reused after linking.
#[derive(Debug)]
pub struct ShaderObject {
    source: ShaderSource,
    compiled: bool,
    log: String,
    interface: StageInterface,
}

impl ShaderObject {
    pub fn label(&self) -> &'static str {
        self.source.label
    }

    pub fn stage(&self) -> ShaderStage {
        self.source.stage
    }

    pub fn entry_point(&self) -> &'static str {
        self.source.entry_point
    }

    /// Compile status flag.
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Diagnostic log of the compile attempt; empty on success.
    ///
    /// Bounded at [`INFO_LOG_CAPACITY`](super::INFO_LOG_CAPACITY) characters.
    pub fn info_log(&self) -> &str {
        &self.log
    }

    /// Locations read and written by the stage's entry point.
    ///
    /// Empty when compilation failed.
    pub fn interface(&self) -> &StageInterface {
        &self.interface
    }

    pub(crate) fn source(&self) -> &ShaderSource {
        &self.source
    }

    /// Returns the compile failure as a reportable error.
    pub fn error(&self) -> Option<PipelineError> {
        (!self.compiled).then(|| PipelineError::ShaderCompileFailed {
            stage: self.source.stage,
            log: self.log.clone(),
        })
    }
}

/// Compiles one stage: WGSL parse, module validation, entry point lookup.
///
/// Attempted exactly once. A failure is recorded on the returned object and
/// never panics or returns early to the caller.
pub fn compile_shader(source: &ShaderSource) -> ShaderObject {
    let (compiled, log, interface) = match front_end(source) {
        Ok(interface) => (true, String::new(), interface),
        Err(log) => (false, info_log::bounded(log), StageInterface::default()),
    };

    log::debug!(
        "compiled {} shader `{}`: {}",
        source.stage,
        source.label,
        if compiled { "ok" } else { "failed" }
    );

    ShaderObject {
        source: *source,
        compiled,
        log,
        interface,
    }
}

fn front_end(source: &ShaderSource) -> Result<StageInterface, String> {
    let module =
        naga::front::wgsl::parse_str(source.text).map_err(|e| e.emit_to_string(source.text))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| info_log::describe(&e))?;

    let naga_stage = source.stage.to_naga();
    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga_stage && ep.name == source.entry_point)
        .ok_or_else(|| {
            format!(
                "no {} entry point named `{}` in `{}`",
                source.stage, source.entry_point, source.label
            )
        })?;

    Ok(interface::reflect(&module, entry_point))
}
