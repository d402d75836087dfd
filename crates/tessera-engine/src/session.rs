//! Render session: the program, geometry and GPU objects of one scene.

use crate::coords::ColorRgba;
use crate::geometry::{self, DrawCall, GeometryError, MeshData, VertexArray, VertexLayout};
use crate::render::PipelineCache;
use crate::resource::ResourceLedger;
use crate::shader::{compile_shader, link_program, ShaderProgram, ShaderSource};

/// Everything needed to build a [`RenderSession`].
#[derive(Debug, Clone)]
pub struct SceneDesc {
    pub label: &'static str,
    pub vertex_shader: ShaderSource,
    pub fragment_shader: ShaderSource,
    pub layout: VertexLayout,
    pub mesh: MeshData,
    pub draw: DrawCall,
    pub clear_color: ColorRgba,
    /// `Line` renders edges only and needs `POLYGON_MODE_LINE`.
    pub polygon_mode: wgpu::PolygonMode,
}

impl SceneDesc {
    pub fn with_polygon_mode(mut self, polygon_mode: wgpu::PolygonMode) -> Self {
        self.polygon_mode = polygon_mode;
        self
    }

    /// Device features this scene cannot run without.
    pub fn required_features(&self) -> wgpu::Features {
        match self.polygon_mode {
            wgpu::PolygonMode::Fill => wgpu::Features::empty(),
            wgpu::PolygonMode::Line => wgpu::Features::POLYGON_MODE_LINE,
            wgpu::PolygonMode::Point => wgpu::Features::POLYGON_MODE_POINT,
        }
    }

    /// Checks the scene data without touching the GPU.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.layout.validate()?;
        if self.mesh.floats_per_vertex() != self.layout.floats_per_vertex() {
            return Err(GeometryError::RaggedVertexData {
                floats: self.mesh.vertices().len(),
                floats_per_vertex: self.layout.floats_per_vertex(),
            });
        }
        self.draw.validate(&self.mesh)
    }
}

/// Compiles and links the scene's two stages.
///
/// Failures are logged and the program is returned regardless; a defective
/// program is still bound every frame.
pub fn build_program(vertex: &ShaderSource, fragment: &ShaderSource) -> ShaderProgram {
    let vs = compile_shader(vertex);
    let fs = compile_shader(fragment);

    for obj in [&vs, &fs] {
        if let Some(err) = obj.error() {
            log::error!("`{}`: {err}", obj.label());
        }
    }

    let program = link_program(vs, fs);
    if let Some(err) = program.error() {
        log::error!("`{}`: {err}", program.label());
    }
    program
}

/// GPU objects and settings of the running scene.
///
/// Fields drop in declaration order: vertex array (layout, vertex buffer,
/// index buffer), pipeline, program.
pub struct RenderSession {
    vertex_array: VertexArray,
    pipelines: PipelineCache,
    program: ShaderProgram,
    draw: DrawCall,
    clear_color: ColorRgba,
    ledger: ResourceLedger,
}

/// Borrowed view of a session for encoding one frame.
pub struct FrameResources<'s> {
    pub program: &'s ShaderProgram,
    pub vertex_array: &'s VertexArray,
    pub pipelines: &'s mut PipelineCache,
}

impl RenderSession {
    /// Builds the program, then uploads the scene's geometry.
    ///
    /// Shader problems are not errors here. Malformed geometry is.
    pub fn build(device: &wgpu::Device, scene: &SceneDesc) -> Result<Self, GeometryError> {
        let program = build_program(&scene.vertex_shader, &scene.fragment_shader);

        scene.validate()?;
        if let Err(reason) = scene.layout.check_inputs(program.vertex_inputs()) {
            log::error!("`{}`: {reason}", scene.label);
        }

        let ledger = ResourceLedger::new();
        let vertex_array = geometry::upload(device, scene.label, &scene.mesh, &scene.layout, &ledger)?;

        log::info!(
            "session `{}` ready: program {}, {} vertices, draw {:?}",
            scene.label,
            if program.is_linked() { "linked" } else { "NOT linked" },
            vertex_array.vertex_count(),
            scene.draw
        );

        Ok(Self {
            vertex_array,
            pipelines: PipelineCache::new(scene.polygon_mode, &ledger),
            program,
            draw: scene.draw,
            clear_color: scene.clear_color,
            ledger,
        })
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    pub fn draw(&self) -> DrawCall {
        self.draw
    }

    pub fn clear_color(&self) -> ColorRgba {
        self.clear_color
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Splits the session into the bound program, the draw and the
    /// resources the host encodes with.
    pub fn frame_parts(&mut self) -> (&ShaderProgram, DrawCall, FrameResources<'_>) {
        (
            &self.program,
            self.draw,
            FrameResources {
                program: &self.program,
                vertex_array: &self.vertex_array,
                pipelines: &mut self.pipelines,
            },
        )
    }

    /// Releases every GPU object and returns the ledger for inspection.
    ///
    /// Leaked kinds are logged at `warn`.
    pub fn release(self) -> ResourceLedger {
        let Self {
            vertex_array,
            pipelines,
            program,
            ledger,
            ..
        } = self;

        drop(vertex_array);
        drop(pipelines);
        drop(program);

        let leaks = ledger.leaks();
        if leaks.is_empty() {
            log::debug!("all session resources released");
        } else {
            for (kind, count) in &leaks {
                log::warn!("{count} {kind} object(s) still alive after release");
            }
        }
        ledger
    }
}
