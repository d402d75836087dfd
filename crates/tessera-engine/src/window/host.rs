use winit::window::Window;

use crate::coords::ColorRgba;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::frame::FrameHost;
use crate::geometry::DrawCall;
use crate::input::{InputState, Key, KeyState};
use crate::render::{self, FramePass, RenderCtx, RenderTarget};
use crate::session::FrameResources;
use crate::shader::ShaderProgram;

use super::runtime::should_redraw;

/// Commands recorded by the frame loop, encoded at `present`.
#[derive(Default)]
struct PendingFrame {
    clear: ColorRgba,
    program_bound: bool,
    draw: Option<DrawCall>,
}

/// [`FrameHost`] over one winit window and its wgpu context.
pub(crate) struct WindowHost<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub resources: FrameResources<'a>,
    pub input: &'a InputState,
    pub close_requested: &'a mut bool,
    pending: PendingFrame,
}

impl<'a, 'w> WindowHost<'a, 'w> {
    pub fn new(
        window: &'a Window,
        gpu: &'a mut Gpu<'w>,
        resources: FrameResources<'a>,
        input: &'a InputState,
        close_requested: &'a mut bool,
    ) -> Self {
        Self {
            window,
            gpu,
            resources,
            input,
            close_requested,
            pending: PendingFrame::default(),
        }
    }

    fn encode_and_present(&mut self, pending: PendingFrame) {
        let viewport = self.gpu.viewport();
        if viewport.is_empty() {
            // Minimized: nothing to present into.
            log::trace!("zero-sized viewport; frame skipped");
            return;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface error is unrecoverable; closing");
                        *self.close_requested = true;
                    }
                    action => log::debug!("surface error handled: {action:?}"),
                }
                return;
            }
        };

        let ctx = RenderCtx::from_gpu(self.gpu);

        let program = self.resources.program;
        let vertex_array = self.resources.vertex_array;
        let pipeline = if pending.program_bound {
            self.resources.pipelines.ensure(&ctx, program, vertex_array)
        } else {
            None
        };

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            render::record(
                &mut target,
                &FramePass {
                    clear: pending.clear,
                    viewport,
                    pipeline,
                    vertex_array,
                    draw: pending.draw,
                },
            );
        }

        self.gpu.submit_and_present(self.window, frame);
    }
}

impl FrameHost for WindowHost<'_, '_> {
    fn should_close(&self) -> bool {
        *self.close_requested
    }

    fn request_close(&mut self) {
        log::info!("close requested");
        *self.close_requested = true;
    }

    fn key_state(&self, key: Key) -> KeyState {
        self.input.key_state(key)
    }

    fn clear(&mut self, color: ColorRgba) {
        self.pending.clear = color;
    }

    fn use_program(&mut self, program: &ShaderProgram) {
        debug_assert!(std::ptr::eq(program, self.resources.program));
        self.pending.program_bound = true;
    }

    fn draw(&mut self, draw: DrawCall) {
        self.pending.draw = Some(draw);
    }

    fn present(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.encode_and_present(pending);
    }

    fn poll_events(&mut self) {
        // winit dispatches queued events once this handler returns.
        if should_redraw(self.gpu.viewport(), *self.close_requested) {
            self.window.request_redraw();
        }
    }
}
