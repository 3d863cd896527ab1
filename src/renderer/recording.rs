//! A `DrawSink` that records draw calls instead of painting them

use glam::Vec2;

use super::{DrawSink, TextStyle};

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Circle { center: Vec2, radius: f32, color: String },
    Square { top_left: Vec2, side: f32, color: String },
    Rect { top_left: Vec2, size: Vec2, color: String },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Recording sink used by tests and the headless runner
#[derive(Debug, Clone)]
pub struct DrawLog {
    pub commands: Vec<DrawCommand>,
    /// Fixed advance per character for `measure_text`
    pub char_width: f32,
    /// Number of surface clears (one per rendered frame)
    pub frames: u64,
    /// Only keep commands since the last clear
    pub keep_last_frame_only: bool,
}

impl Default for DrawLog {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            char_width: 6.0,
            frames: 0,
            keep_last_frame_only: false,
        }
    }
}

impl DrawLog {
    /// A log that only retains the most recent frame
    pub fn last_frame() -> Self {
        Self {
            keep_last_frame_only: true,
            ..Self::default()
        }
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSink for DrawLog {
    fn clear(&mut self, width: f32, height: f32) {
        self.frames += 1;
        if self.keep_last_frame_only {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_square(&mut self, top_left: Vec2, side: f32, color: &str) {
        self.commands.push(DrawCommand::Square {
            top_left,
            side,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: &str) {
        self.commands.push(DrawCommand::Rect {
            top_left,
            size,
            color: color.to_string(),
        });
    }

    fn measure_text(&mut self, text: &str, _font: &str) -> f32 {
        self.char_width * text.chars().count() as f32
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style: style.clone(),
        });
    }
}
