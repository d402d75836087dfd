use crate::coords::ColorRgba;
use crate::geometry::DrawCall;
use crate::input::{Key, KeyState};
use crate::shader::ShaderProgram;

/// Window, input and command surface the frame loop drives.
///
/// The runtime implements this over winit + wgpu. Calls arrive in a fixed
/// order per iteration; implementations may defer GPU work until
/// [`present`](FrameHost::present).
pub trait FrameHost {
    /// Whether a close was requested (window close button or
    /// [`request_close`](FrameHost::request_close)).
    fn should_close(&self) -> bool;

    /// Raises the close flag. Takes effect at the next loop check.
    fn request_close(&mut self);

    fn key_state(&self, key: Key) -> KeyState;

    /// Clears the color buffer of the current frame.
    fn clear(&mut self, color: ColorRgba);

    /// Binds `program` for subsequent draws, linked or not.
    fn use_program(&mut self, program: &ShaderProgram);

    fn draw(&mut self, draw: DrawCall);

    /// Submits the frame and presents it.
    fn present(&mut self);

    /// Processes pending window-system events.
    fn poll_events(&mut self);
}
