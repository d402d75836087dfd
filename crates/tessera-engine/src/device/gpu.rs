use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Viewport;
use crate::error::PipelineError;
use crate::shader::info_log;

use super::surface;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// Owns the wgpu objects bound to one window.
///
/// - resolves the adapter, then creates and stores Device/Queue
/// - creates and configures the Surface (swapchain)
/// - tracks the viewport the frame loop draws into
/// - acquires and presents frames
pub struct Gpu<'w> {
    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the window must outlive the
    /// `Gpu` instance.
    surface: wgpu::Surface<'w>,

    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    /// Always `(0, 0, size.width, size.height)`.
    viewport: Viewport,
}

impl<'w> Gpu<'w> {
    /// Creates the surface for `window`, then resolves adapter, device and
    /// queue for it.
    ///
    /// Surface failures are `ContextCreationFailed`; adapter or device
    /// failures are `EntryPointResolutionFailed`. Both abort startup.
    pub async fn new(window: &'w Window, init: &GpuInit) -> Result<Self, PipelineError> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(PipelineError::ContextCreationFailed(
                "window has zero size".into(),
            ));
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        // Surface lifetime is tied to `window` via `'w`.
        let surface = instance.create_surface(window).map_err(|e| {
            PipelineError::ContextCreationFailed(format!(
                "failed to create surface: {}",
                info_log::describe(&e)
            ))
        })?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| {
                PipelineError::EntryPointResolutionFailed(format!(
                    "no suitable adapter for backends {:?}: {}",
                    init.backends,
                    info_log::describe(&e)
                ))
            })?;

        let info = adapter.get_info();
        log::info!(
            "adapter: {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let missing = init.required_features - adapter.features();
        if !missing.is_empty() {
            return Err(PipelineError::EntryPointResolutionFailed(format!(
                "adapter `{}` lacks required features {missing:?}",
                info.name
            )));
        }

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tessera device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| {
                PipelineError::EntryPointResolutionFailed(format!(
                    "failed to create device/queue: {}",
                    info_log::describe(&e)
                ))
            })?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, init.prefer_srgb).ok_or_else(
            || PipelineError::ContextCreationFailed("surface supports no formats".into()),
        )?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!(
            "surface configured: {format:?} {}x{} {:?}",
            size.width,
            size.height,
            init.present_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            viewport: surface::viewport_for(size),
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Handles a framebuffer resize.
    ///
    /// The viewport always follows the new size. The surface is reconfigured
    /// only for a nonzero size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.viewport = surface::viewport_for(new_size);
        let configured = surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
        log::debug!(
            "resized to {}x{} (surface {})",
            new_size.width,
            new_size.height,
            if configured { "reconfigured" } else { "deferred" }
        );
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tessera frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    ///
    /// With FIFO presentation this paces the loop to the display refresh.
    pub fn submit_and_present(&self, window: &Window, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        window.pre_present_notify();
        surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}
