//! Rendering module
//!
//! The game draws through a small set of 2D primitives (`DrawSink`). The
//! browser backend maps them onto a canvas context; tests and the headless
//! runner record them instead.

pub mod recording;
pub mod scene;

pub use recording::{DrawCommand, DrawLog};
pub use scene::{render_game_over, render_world, score_line, statistics_line};

use glam::Vec2;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// How a piece of text is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: String,
    /// CSS font shorthand, e.g. `18px monospace`
    pub font: String,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(color: &str, font: &str, align: TextAlign) -> Self {
        Self {
            color: color.to_string(),
            font: font.to_string(),
            align,
        }
    }
}

/// Drawing primitives the game needs from a rendering surface
pub trait DrawSink {
    /// Clear the whole surface
    fn clear(&mut self, width: f32, height: f32);
    /// Outline a circle
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str);
    /// Fill an axis-aligned square anchored at its top-left corner
    fn fill_square(&mut self, top_left: Vec2, side: f32, color: &str);
    /// Fill a rectangle (used to blank the area behind text)
    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: &str);
    /// Width `text` would occupy in `font`
    fn measure_text(&mut self, text: &str, font: &str) -> f32;
    /// Draw text with its baseline at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}
