/// Viewport rectangle in physical pixels.
///
/// Draws are mapped from clip space onto this rectangle. The resize handler
/// keeps it equal to `(0, 0, width, height)` of the drawable surface.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole `width` x `height` surface.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `(x, y, w, h)` as floats, the shape `RenderPass::set_viewport` takes.
    #[inline]
    pub fn to_f32(self) -> (f32, f32, f32, f32) {
        (
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}
