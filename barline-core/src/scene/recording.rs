//! Painter that records every call instead of rasterizing. Lets headless
//! checks assert on what a layer would draw.

use super::{Painter, Rect};
use crate::color::Rgba;

#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    Alpha(f32),
    FillRect { rect: Rect, color: Rgba },
    FillRoundRect { rect: Rect, radius: f64, color: Rgba },
    StrokeRect { rect: Rect, color: Rgba, width: f64 },
    Line { from: (f64, f64), to: (f64, f64), color: Rgba, width: f64 },
    Triangle { points: [(f64, f64); 3], color: Rgba },
    Text { text: String, x: f64, y: f64 },
    PushClip(Rect),
    PopClip,
}

#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub ops: Vec<PaintOp>,
}

impl RecordingPainter {
    pub fn count(&self, pred: impl Fn(&PaintOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Painter for RecordingPainter {
    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(PaintOp::Alpha(alpha));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ops.push(PaintOp::FillRect { rect, color });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Rgba) {
        self.ops.push(PaintOp::FillRoundRect { rect, radius, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f64) {
        self.ops.push(PaintOp::StrokeRect { rect, color, width });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        self.ops.push(PaintOp::Line { from, to, color, width });
    }

    fn fill_triangle(&mut self, points: [(f64, f64); 3], color: Rgba) {
        self.ops.push(PaintOp::Triangle { points, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _font_px: f64, _color: Rgba) {
        self.ops.push(PaintOp::Text { text: text.to_string(), x, y });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(PaintOp::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(PaintOp::PopClip);
    }
}
