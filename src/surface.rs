//! The 2D drawing surface the game paints on, in pixel units.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const SKY_BLUE: Rgb = Rgb(135, 206, 235);
pub const LIGHT_GREEN: Rgb = Rgb(144, 238, 144);
pub const WINDOW_TINT: Rgb = Rgb(60, 60, 80);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Drawing primitives over a fixed-size pixel canvas.
///
/// The size may change between frames (a resized terminal); callers read it
/// at the start of every frame.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_rect(&mut self, rect: Rect, color: Rgb);
    /// Draw text with its baseline-left corner at (x, y).
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb);
}

/// A surface that draws nothing. Used for headless runs.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessSurface {
    pub width: f32,
    pub height: f32,
}

impl HeadlessSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Surface for HeadlessSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {}

    fn fill_rect(&mut self, _rect: Rect, _color: Rgb) {}

    fn stroke_rect(&mut self, _rect: Rect, _color: Rgb) {}

    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32, _color: Rgb) {}
}
