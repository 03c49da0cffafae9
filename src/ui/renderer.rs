// Drawing interface the game calls into
//
// All coordinates are logical court units (see `game::geometry`); each
// renderer decides how those map onto its output.

use std::io;

use crate::game::Bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb(c[0], c[1], c[2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Text size class. Large is used for scores, titles and the winner banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Large,
    Small,
}

/// Rendered text with its size in logical units, ready to be blitted
#[derive(Debug, Clone, PartialEq)]
pub struct TextSurface {
    pub text: String,
    pub font: Font,
    pub color: Rgb,
    pub width: i32,
    pub height: i32,
}

impl TextSurface {
    /// Top-left corner that puts the surface's center on `center`
    pub fn centered_at(&self, center: Point) -> Point {
        Point::new(center.x - self.width / 2, center.y - self.height / 2)
    }
}

pub trait Renderer {
    /// Start a new frame filled with `color`
    fn clear(&mut self, color: Rgb);

    fn draw_rect(&mut self, bounds: Bounds, color: Rgb);

    fn draw_ellipse(&mut self, bounds: Bounds, color: Rgb);

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, antialiased: bool);

    /// Lay out `text` without placing it
    fn draw_text(&mut self, text: &str, font: Font, color: Rgb) -> TextSurface;

    fn blit(&mut self, surface: &TextSurface, top_left: Point);

    /// Push the finished frame to the output
    fn present(&mut self) -> io::Result<()>;
}
