//! `DrawSink` backed by a `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::backing_store_side;
use crate::consts::PLAYFIELD_SIZE;
use crate::renderer::{DrawSink, TextAlign, TextStyle};

/// Canvas drawing surface
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSink {
    /// Size the canvas to the playfield and grab its 2D context.
    ///
    /// The backing store holds `devicePixelRatio` device pixels per
    /// playfield unit; the context is scaled so drawing stays in units.
    pub fn new(canvas: &HtmlCanvasElement, device_pixel_ratio: f64) -> Result<Self, JsValue> {
        let side = backing_store_side(device_pixel_ratio);
        canvas.set_width(side);
        canvas.set_height(side);

        let css_side = format!("{}px", PLAYFIELD_SIZE);
        let style = canvas.style();
        style.set_property("width", &css_side)?;
        style.set_property("height", &css_side)?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        // Resizing reset the transform
        let scale = f64::from(side) / f64::from(PLAYFIELD_SIZE);
        ctx.scale(scale, scale)?;
        log::info!("Canvas backing store {}x{} (scale {:.2})", side, side, scale);
        Ok(Self { ctx })
    }
}

fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("{} failed: {:?}", what, e);
    }
}

impl DrawSink for CanvasSink {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(color);
        report(
            "arc",
            self.ctx
                .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU),
        );
        self.ctx.stroke();
    }

    fn fill_square(&mut self, top_left: Vec2, side: f32, color: &str) {
        self.fill_rect(top_left, Vec2::splat(side), color);
    }

    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            top_left.x as f64,
            top_left.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn measure_text(&mut self, text: &str, font: &str) -> f32 {
        self.ctx.set_font(font);
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            Err(e) => {
                log::warn!("measure_text failed: {:?}", e);
                0.0
            }
        }
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_fill_style_str(&style.color);
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "center",
        });
        report(
            "fill_text",
            self.ctx.fill_text(text, pos.x as f64, pos.y as f64),
        );
    }
}
