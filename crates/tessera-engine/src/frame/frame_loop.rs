use crate::coords::ColorRgba;
use crate::geometry::DrawCall;
use crate::input::{Key, KeyState};
use crate::shader::ShaderProgram;

use super::FrameHost;

/// Frame loop state. `Exiting` is terminal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FrameState {
    #[default]
    Running,
    Exiting,
}

/// Per-frame driver: input, clear, bind, draw, present, poll.
///
/// The close flag is only consulted at the top of an iteration, so a close
/// raised mid-iteration still lets that frame draw and present.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: FrameState,
    clear_color: ColorRgba,
    frames: u64,
}

impl FrameLoop {
    pub fn new(clear_color: ColorRgba) -> Self {
        Self {
            state: FrameState::Running,
            clear_color,
            frames: 0,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn clear_color(&self) -> ColorRgba {
        self.clear_color
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one iteration against `host`.
    pub fn iterate<H: FrameHost + ?Sized>(
        &mut self,
        host: &mut H,
        program: &ShaderProgram,
        draw: DrawCall,
    ) -> FrameState {
        if self.state == FrameState::Exiting {
            return self.state;
        }
        if host.should_close() {
            log::debug!("close requested; leaving frame loop after {} frames", self.frames);
            self.state = FrameState::Exiting;
            return self.state;
        }

        if host.key_state(Key::Escape) == KeyState::Pressed {
            host.request_close();
        }

        host.clear(self.clear_color);
        host.use_program(program);
        host.draw(draw);
        host.present();
        self.frames += 1;

        host.poll_events();
        log::trace!("frame {} presented", self.frames);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{compile_shader, link_program, ShaderSource};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear(ColorRgba),
        UseProgram { linked: bool },
        Draw(DrawCall),
        Present,
        Poll,
        RequestClose,
    }

    #[derive(Default)]
    struct MockHost {
        close: bool,
        escape_on_poll: Option<usize>,
        polls: usize,
        escape: KeyState,
        calls: Vec<Call>,
    }

    impl MockHost {
        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }
    }

    impl FrameHost for MockHost {
        fn should_close(&self) -> bool {
            self.close
        }

        fn request_close(&mut self) {
            self.close = true;
            self.calls.push(Call::RequestClose);
        }

        fn key_state(&self, key: Key) -> KeyState {
            match key {
                Key::Escape => self.escape,
                _ => KeyState::Released,
            }
        }

        fn clear(&mut self, color: ColorRgba) {
            self.calls.push(Call::Clear(color));
        }

        fn use_program(&mut self, program: &ShaderProgram) {
            self.calls.push(Call::UseProgram {
                linked: program.is_linked(),
            });
        }

        fn draw(&mut self, draw: DrawCall) {
            self.calls.push(Call::Draw(draw));
        }

        fn present(&mut self) {
            self.calls.push(Call::Present);
        }

        fn poll_events(&mut self) {
            self.polls += 1;
            if self.escape_on_poll == Some(self.polls) {
                self.escape = KeyState::Pressed;
            }
            self.calls.push(Call::Poll);
        }
    }

    const VS: &str = "@vertex fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> { return vec4<f32>(p, 1.0); }";
    const FS: &str = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0, 0.0, 0.0, 1.0); }";

    fn program(fragment: &'static str) -> ShaderProgram {
        link_program(
            compile_shader(&ShaderSource::vertex("vs", VS)),
            compile_shader(&ShaderSource::fragment("fs", fragment)),
        )
    }

    const DRAW: DrawCall = DrawCall::Arrays { first: 0, count: 3 };
    const BLUE: ColorRgba = ColorRgba::new(0.0, 0.0, 1.0, 0.0);

    #[test]
    fn iteration_order_is_fixed() {
        let mut host = MockHost::default();
        let mut frame_loop = FrameLoop::new(BLUE);

        assert_eq!(frame_loop.iterate(&mut host, &program(FS), DRAW), FrameState::Running);
        assert_eq!(
            host.calls,
            vec![
                Call::Clear(BLUE),
                Call::UseProgram { linked: true },
                Call::Draw(DRAW),
                Call::Present,
                Call::Poll,
            ]
        );
        assert_eq!(frame_loop.frames(), 1);
    }

    #[test]
    fn escape_finishes_the_current_frame() {
        let program = program(FS);
        let mut host = MockHost {
            escape_on_poll: Some(2),
            ..MockHost::default()
        };
        let mut frame_loop = FrameLoop::new(BLUE);

        // Iteration 1 polls nothing interesting, iteration 2's poll reports
        // Escape, iteration 3 sees it and requests close but still draws.
        for _ in 0..3 {
            assert_eq!(frame_loop.iterate(&mut host, &program, DRAW), FrameState::Running);
        }
        assert_eq!(host.count(|c| matches!(c, Call::Draw(_))), 3);
        assert_eq!(host.count(|c| *c == Call::Present), 3);

        let third = &host.calls[host.calls.len() - 6..];
        assert_eq!(third[0], Call::RequestClose);
        assert_eq!(third[3], Call::Draw(DRAW));
        assert_eq!(third[4], Call::Present);

        // Iteration 4 exits without drawing.
        let before = host.calls.len();
        assert_eq!(frame_loop.iterate(&mut host, &program, DRAW), FrameState::Exiting);
        assert_eq!(host.calls.len(), before);
        assert_eq!(frame_loop.frames(), 3);
    }

    #[test]
    fn window_close_is_observed_at_loop_top() {
        let mut host = MockHost {
            close: true,
            ..MockHost::default()
        };
        let mut frame_loop = FrameLoop::new(BLUE);

        assert_eq!(frame_loop.iterate(&mut host, &program(FS), DRAW), FrameState::Exiting);
        assert!(host.calls.is_empty());
        assert_eq!(frame_loop.frames(), 0);
    }

    #[test]
    fn exiting_is_terminal() {
        let program = program(FS);
        let mut host = MockHost {
            close: true,
            ..MockHost::default()
        };
        let mut frame_loop = FrameLoop::new(BLUE);
        frame_loop.iterate(&mut host, &program, DRAW);

        host.close = false;
        assert_eq!(frame_loop.iterate(&mut host, &program, DRAW), FrameState::Exiting);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn unlinked_program_is_still_bound_and_drawn() {
        // Fragment input at location 1 is never written by the vertex stage.
        let broken = program(
            "@fragment fn fs_main(@location(1) c: vec3<f32>) -> @location(0) vec4<f32> { return vec4<f32>(c, 1.0); }",
        );
        assert!(!broken.is_linked());

        let mut host = MockHost::default();
        FrameLoop::new(BLUE).iterate(&mut host, &broken, DRAW);

        assert!(host.calls.contains(&Call::UseProgram { linked: false }));
        assert!(host.calls.contains(&Call::Draw(DRAW)));
    }
}
