use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, GpuInit};
use crate::error::PipelineError;
use crate::frame::{FrameLoop, FrameState};
use crate::input::{self, InputState};
use crate::session::{RenderSession, SceneDesc};

use super::host::WindowHost;

/// Window title shared by every scene.
pub const DEFAULT_TITLE: &str = "Graphics Library that is Open";

/// Window + GPU configuration of a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gpu: GpuInit,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            gpu: GpuInit::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds `scene` and runs the frame loop until the
    /// window closes or Escape is pressed.
    ///
    /// Context, device and geometry failures are returned. Shader failures
    /// are logged and the loop runs with the defective program.
    pub fn run(config: SessionConfig, scene: SceneDesc) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Frames are requested only while there is a surface to present into, or
/// when a pending close still has to be observed by the frame loop.
pub(crate) fn should_redraw(viewport: Viewport, close_requested: bool) -> bool {
    close_requested || !viewport.is_empty()
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState {
    config: SessionConfig,
    scene: SceneDesc,

    // Dropped before `entry`: GPU objects go before their device.
    session: Option<RenderSession>,
    entry: Option<WindowEntry>,

    input: InputState,
    close_requested: bool,
    frame_loop: FrameLoop,

    fatal: Option<anyhow::Error>,
    finished: bool,
}

impl AppState {
    fn new(config: SessionConfig, scene: SceneDesc) -> Self {
        let frame_loop = FrameLoop::new(scene.clear_color);
        Self {
            config,
            scene,
            session: None,
            entry: None,
            input: InputState::default(),
            close_requested: false,
            frame_loop,
            fatal: None,
            finished: false,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| PipelineError::ContextCreationFailed(e.to_string()))?;

        let mut gpu_init = self.config.gpu.clone();
        gpu_init.required_features |= self.scene.required_features();

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, &gpu_init)),
        }
        .try_build()?;

        let session = entry
            .with_gpu(|gpu| RenderSession::build(gpu.device(), &self.scene))
            .with_context(|| format!("invalid scene `{}`", self.scene.label))?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        self.session = Some(session);
        Ok(())
    }

    fn redraw(&mut self) -> FrameState {
        let Self {
            entry,
            session,
            input,
            close_requested,
            frame_loop,
            ..
        } = self;

        let (Some(entry), Some(session)) = (entry.as_mut(), session.as_mut()) else {
            return frame_loop.state();
        };

        entry.with_mut(|fields| {
            let (program, draw, resources) = session.frame_parts();
            let mut host = WindowHost::new(
                fields.window,
                fields.gpu,
                resources,
                input,
                close_requested,
            );
            frame_loop.iterate(&mut host, program, draw)
        })
    }

    /// Asks for the next frame unless the window is minimized.
    fn request_redraw(&self) {
        if let Some(entry) = &self.entry {
            let viewport = entry.with_gpu(|gpu| gpu.viewport());
            if should_redraw(viewport, self.close_requested) {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    /// Releases the session, then the GPU context and window.
    fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        if let Some(session) = self.session.take() {
            session.release();
        }
        self.entry = None;

        log::info!(
            "session ended after {} presented frames",
            self.frame_loop.frames()
        );
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.finished {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("startup failed: {e:#}");
            self.fatal = Some(e);
            self.shutdown();
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.finished {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(ev) = input::translate_window_event(&event) {
            self.input.apply_event(ev);
        }

        match &event {
            WindowEvent::CloseRequested => {
                // Observed by the frame loop at its next check.
                self.close_requested = true;
                self.request_redraw();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                }
                self.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == FrameState::Exiting {
                    self.shutdown();
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
