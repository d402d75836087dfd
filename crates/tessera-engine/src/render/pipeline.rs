use crate::error::PipelineError;
use crate::geometry::VertexArray;
use crate::render::RenderCtx;
use crate::resource::{ResourceKind, ResourceLedger, Scoped};
use crate::shader::{info_log, ShaderProgram, StageModule};

/// GPU pipeline for the session program, built on first use and rebuilt
/// when the surface format changes.
///
/// Unlinked programs never reach the GPU; [`ensure`](Self::ensure) returns
/// `None` for them and the frame shows only the clear color. The same holds
/// when the device rejects the pipeline: the rejection is reported once as a
/// link failure and not retried for that surface format.
pub struct PipelineCache {
    polygon_mode: wgpu::PolygonMode,
    format: Option<wgpu::TextureFormat>,
    pipeline: Option<Scoped<wgpu::RenderPipeline>>,
    /// Surface format for which the device rejected the pipeline.
    rejected: Option<wgpu::TextureFormat>,
    ledger: ResourceLedger,
    warned: bool,
}

impl PipelineCache {
    pub fn new(polygon_mode: wgpu::PolygonMode, ledger: &ResourceLedger) -> Self {
        Self {
            polygon_mode,
            format: None,
            pipeline: None,
            rejected: None,
            ledger: ledger.clone(),
            warned: false,
        }
    }

    /// Returns the pipeline for `program` over `vao`, creating it if needed.
    pub fn ensure(
        &mut self,
        ctx: &RenderCtx<'_>,
        program: &ShaderProgram,
        vao: &VertexArray,
    ) -> Option<&wgpu::RenderPipeline> {
        if !program.is_linked() {
            self.warn_once(format_args!(
                "program `{}` is not linked; draws produce no output",
                program.label()
            ));
            return None;
        }
        if let Err(reason) = vao.layout().check_inputs(program.vertex_inputs()) {
            self.warn_once(format_args!(
                "vertex array `{}` does not match program `{}`: {reason}",
                vao.label(),
                program.label()
            ));
            return None;
        }
        if self.rejected == Some(ctx.surface_format) {
            return None;
        }

        if self.format != Some(ctx.surface_format) || self.pipeline.is_none() {
            self.pipeline = None;
            match self.build(ctx, program, vao) {
                Ok(pipeline) => {
                    self.format = Some(ctx.surface_format);
                    self.pipeline =
                        Some(Scoped::new(pipeline, ResourceKind::Program, &self.ledger));
                    log::debug!(
                        "built pipeline for `{}` ({:?}, {:?})",
                        program.label(),
                        ctx.surface_format,
                        self.polygon_mode
                    );
                }
                Err(err) => {
                    self.rejected = Some(ctx.surface_format);
                    self.warn_once(format_args!(
                        "program `{}` rejected by the device; draws produce no output: {err}",
                        program.label()
                    ));
                    return None;
                }
            }
        }

        self.pipeline.as_deref()
    }

    fn warn_once(&mut self, message: std::fmt::Arguments<'_>) {
        if !self.warned {
            log::warn!("{message}");
            self.warned = true;
        }
    }

    /// Creates the shader modules and the pipeline under a validation error
    /// scope. Anything the device rejects comes back as `ProgramLinkFailed`.
    fn build(
        &self,
        ctx: &RenderCtx<'_>,
        program: &ShaderProgram,
        vao: &VertexArray,
    ) -> Result<wgpu::RenderPipeline, PipelineError> {
        let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = |stage: &StageModule| {
            ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(stage.label),
                source: wgpu::ShaderSource::Wgsl(stage.text.into()),
            })
        };
        let vs = module(program.vertex());
        let fs = module(program.fragment());

        // No bind groups: the program reads vertex attributes only.
        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("tessera pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = vao.with_buffer_layout(|buffer_layout| {
            ctx.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(program.label()),
                    layout: Some(&pipeline_layout),

                    vertex: wgpu::VertexState {
                        module: &vs,
                        entry_point: Some(program.vertex().entry_point),
                        compilation_options: Default::default(),
                        buffers: &[buffer_layout],
                    },

                    fragment: Some(wgpu::FragmentState {
                        module: &fs,
                        entry_point: Some(program.fragment().entry_point),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: ctx.surface_format,
                            blend: None,
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),

                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: self.polygon_mode,
                        unclipped_depth: false,
                        conservative: false,
                    },

                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),
                    multiview_mask: None,
                    cache: None,
                })
        });

        match pollster::block_on(scope.pop()) {
            None => Ok(pipeline),
            Some(err) => Err(PipelineError::ProgramLinkFailed {
                log: info_log::bounded(info_log::describe(&err)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::device::headless::headless_device;
    use crate::geometry::{upload, MeshData, VertexLayout};
    use crate::shader::{compile_shader, link_program, ShaderSource};

    const VS: &str = "
        @vertex
        fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(position, 1.0);
        }
    ";

    const FS: &str = "
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.5, 0.2, 1.0);
        }
    ";

    // Valid WGSL whose uniform has no slot in the empty pipeline layout.
    const FS_UNIFORM: &str = "
        @group(0) @binding(0) var<uniform> tint: vec4<f32>;

        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return tint;
        }
    ";

    fn triangle(device: &wgpu::Device, ledger: &ResourceLedger) -> VertexArray {
        let layout = VertexLayout::interleaved(&[3]);
        let mesh = MeshData::new(
            vec![-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0],
            &layout,
        )
        .expect("valid mesh");
        upload(device, "triangle", &mesh, &layout, ledger).expect("upload succeeds")
    }

    fn ctx(device: &wgpu::Device) -> RenderCtx<'_> {
        RenderCtx {
            device,
            surface_format: wgpu::TextureFormat::Bgra8Unorm,
            viewport: Viewport::full(800, 600),
        }
    }

    fn program(fs: &'static str) -> ShaderProgram {
        link_program(
            compile_shader(&ShaderSource::vertex("vs", VS)),
            compile_shader(&ShaderSource::fragment("fs", fs)),
        )
    }

    #[test]
    fn linked_program_builds_once() {
        let Some((device, _queue)) = headless_device() else {
            return;
        };
        let ledger = ResourceLedger::new();
        let vao = triangle(&device, &ledger);
        let program = program(FS);
        let mut cache = PipelineCache::new(wgpu::PolygonMode::Fill, &ledger);

        assert!(cache.ensure(&ctx(&device), &program, &vao).is_some());
        assert!(cache.ensure(&ctx(&device), &program, &vao).is_some());
        assert_eq!(ledger.outstanding(ResourceKind::Program), 1);

        drop(cache);
        assert_eq!(ledger.outstanding(ResourceKind::Program), 0);
    }

    #[test]
    fn device_rejection_yields_no_pipeline() {
        let Some((device, _queue)) = headless_device() else {
            return;
        };
        let ledger = ResourceLedger::new();
        let vao = triangle(&device, &ledger);
        let program = program(FS_UNIFORM);
        assert!(program.is_linked(), "{}", program.info_log());

        let mut cache = PipelineCache::new(wgpu::PolygonMode::Fill, &ledger);
        assert!(cache.ensure(&ctx(&device), &program, &vao).is_none());
        assert!(cache.ensure(&ctx(&device), &program, &vao).is_none());
        assert_eq!(ledger.outstanding(ResourceKind::Program), 0);
    }
}
