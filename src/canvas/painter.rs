use barline_core::scene::{Painter, Rect};
use barline_core::Rgba;
use std::fmt::Write;
use web_sys::CanvasRenderingContext2d;

/// String buffers reused across frames so painting does not allocate for
/// every style change.
#[derive(Default)]
pub struct StyleScratch {
    css: String,
    font: String,
    font_px: f64,
}

/// [`Painter`] over a Canvas 2D context. The context transform must already
/// map CSS pixels to device pixels.
pub struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
    scratch: &'a mut StyleScratch,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, scratch: &'a mut StyleScratch) -> Self {
        Self { ctx, scratch }
    }

    fn fill_style(&mut self, color: Rgba) {
        color.write_css(&mut self.scratch.css);
        self.ctx.set_fill_style_str(&self.scratch.css);
    }

    fn stroke_style(&mut self, color: Rgba, width: f64) {
        color.write_css(&mut self.scratch.css);
        self.ctx.set_stroke_style_str(&self.scratch.css);
        self.ctx.set_line_width(width);
    }

    fn set_font(&mut self, px: f64) {
        if self.scratch.font.is_empty() || self.scratch.font_px != px {
            self.scratch.font.clear();
            let _ = write!(self.scratch.font, "{px}px system-ui, sans-serif");
            self.scratch.font_px = px;
        }
        self.ctx.set_font(&self.scratch.font);
    }
}

impl Painter for CanvasPainter<'_> {
    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.fill_style(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Rgba) {
        self.fill_style(color);
        let ctx = self.ctx;
        let r = radius.min(rect.w * 0.5).min(rect.h * 0.5).max(0.0);
        let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());
        ctx.begin_path();
        ctx.move_to(x0 + r, y0);
        let _ = ctx.arc_to(x1, y0, x1, y1, r);
        let _ = ctx.arc_to(x1, y1, x0, y1, r);
        let _ = ctx.arc_to(x0, y1, x0, y0, r);
        let _ = ctx.arc_to(x0, y0, x1, y0, r);
        ctx.close_path();
        ctx.fill();
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f64) {
        self.stroke_style(color, width);
        // inset by half the width so the outline stays inside the rect
        let h = width * 0.5;
        self.ctx.stroke_rect(rect.x + h, rect.y + h, (rect.w - width).max(0.0), (rect.h - width).max(0.0));
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        self.stroke_style(color, width);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn fill_triangle(&mut self, points: [(f64, f64); 3], color: Rgba) {
        self.fill_style(color);
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.move_to(points[0].0, points[0].1);
        ctx.line_to(points[1].0, points[1].1);
        ctx.line_to(points[2].0, points[2].1);
        ctx.close_path();
        ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: Rgba) {
        self.set_font(font_px);
        self.fill_style(color);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(rect.x, rect.y, rect.w, rect.h);
        self.ctx.clip();
    }

    fn pop_clip(&mut self) {
        self.ctx.restore();
    }
}
