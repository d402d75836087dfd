use std::fmt;

/// Pipeline stage a shader source targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }

    /// Default entry point name for the stage.
    pub const fn default_entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// WGSL source text for one stage, embedded at build time.
///
/// Every stage of a session is written in WGSL; mixing shading languages
/// across stages is not supported.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderSource {
    pub label: &'static str,
    pub stage: ShaderStage,
    pub entry_point: &'static str,
    pub text: &'static str,
}

impl ShaderSource {
    pub const fn vertex(label: &'static str, text: &'static str) -> Self {
        Self::new(label, ShaderStage::Vertex, text)
    }

    pub const fn fragment(label: &'static str, text: &'static str) -> Self {
        Self::new(label, ShaderStage::Fragment, text)
    }

    pub const fn new(label: &'static str, stage: ShaderStage, text: &'static str) -> Self {
        Self {
            label,
            stage,
            entry_point: stage.default_entry_point(),
            text,
        }
    }

    /// Overrides the entry point name (defaults: `vs_main` / `fs_main`).
    pub const fn with_entry_point(mut self, entry_point: &'static str) -> Self {
        self.entry_point = entry_point;
        self
    }
}
