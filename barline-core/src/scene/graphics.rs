use crate::color::Rgba;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Smallest rect containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

/// One retained drawing command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCmd {
    FillRect { rect: Rect, color: Rgba },
    FillRoundRect { rect: Rect, radius: f64, color: Rgba },
    StrokeRect { rect: Rect, color: Rgba, width: f64 },
    Line { from: (f64, f64), to: (f64, f64), color: Rgba, width: f64 },
    FillTriangle { points: [(f64, f64); 3], color: Rgba },
}

impl DrawCmd {
    pub fn bounds(&self) -> Rect {
        match *self {
            DrawCmd::FillRect { rect, .. }
            | DrawCmd::FillRoundRect { rect, .. }
            | DrawCmd::StrokeRect { rect, .. } => rect,
            DrawCmd::Line { from, to, .. } => {
                let x = from.0.min(to.0);
                let y = from.1.min(to.1);
                Rect::new(x, y, (from.0 - to.0).abs(), (from.1 - to.1).abs())
            }
            DrawCmd::FillTriangle { points, .. } => {
                let (mut x0, mut y0) = points[0];
                let (mut x1, mut y1) = points[0];
                for &(x, y) in &points[1..] {
                    x0 = x0.min(x);
                    y0 = y0.min(y);
                    x1 = x1.max(x);
                    y1 = y1.max(y);
                }
                Rect::new(x0, y0, x1 - x0, y1 - y0)
            }
        }
    }
}

/// Retained shape: a display list that survives between frames.
///
/// `clear` drops the commands but keeps the allocation, so a redraw pass
/// that emits a similar number of commands does not touch the allocator.
#[derive(Clone, Debug)]
pub struct Graphics {
    cmds: Vec<DrawCmd>,
    pub alpha: f32,
    pub visible: bool,
}

impl Default for Graphics {
    fn default() -> Self {
        Self { cmds: Vec::new(), alpha: 1.0, visible: true }
    }
}

impl Graphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Drop the retained storage as well; used at teardown.
    pub fn destroy(&mut self) {
        self.cmds = Vec::new();
        self.visible = false;
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.cmds.push(DrawCmd::FillRect { rect, color });
    }

    pub fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Rgba) {
        // the radius can never exceed half the shorter side
        let radius = radius.min(rect.w * 0.5).min(rect.h * 0.5).max(0.0);
        self.cmds.push(DrawCmd::FillRoundRect { rect, radius, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f64) {
        self.cmds.push(DrawCmd::StrokeRect { rect, color, width });
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        self.cmds.push(DrawCmd::Line { from, to, color, width });
    }

    pub fn fill_triangle(&mut self, points: [(f64, f64); 3], color: Rgba) {
        self.cmds.push(DrawCmd::FillTriangle { points, color });
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cmds.capacity()
    }

    /// Union of every command's bounds, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.cmds.iter().map(DrawCmd::bounds);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, r| acc.union(&r)))
    }
}

/// Retained text label.
#[derive(Clone, Debug)]
pub struct Text {
    content: String,
    pub x: f64,
    pub y: f64,
    pub font_px: f64,
    pub color: Rgba,
    pub alpha: f32,
    pub visible: bool,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            content: String::new(),
            x: 0.0,
            y: 0.0,
            font_px: 11.0,
            color: Rgba::rgb(255, 255, 255),
            alpha: 1.0,
            visible: true,
        }
    }
}

impl Text {
    /// Replace the text, reusing the existing buffer.
    pub fn set_text(&mut self, text: &str) {
        if self.content != text {
            self.content.clear();
            self.content.push_str(text);
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn destroy(&mut self) {
        self.content = String::new();
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_keeps_capacity() {
        let mut g = Graphics::new();
        for i in 0..64 {
            g.fill_rect(Rect::new(i as f64, 0.0, 1.0, 1.0), Rgba::rgb(0, 0, 0));
        }
        let cap = g.capacity();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.capacity(), cap);
    }

    #[test]
    fn test_round_rect_radius_is_limited() {
        let mut g = Graphics::new();
        g.fill_round_rect(Rect::new(0.0, 0.0, 6.0, 40.0), 10.0, Rgba::rgb(1, 1, 1));
        match g.commands()[0] {
            DrawCmd::FillRoundRect { radius, .. } => assert_eq!(radius, 3.0),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_bounds_union() {
        let mut g = Graphics::new();
        assert_eq!(g.bounds(), None);
        g.line((10.0, 0.0), (10.0, 50.0), Rgba::rgb(0, 0, 0), 1.0);
        g.fill_triangle([(4.0, 0.0), (16.0, 0.0), (10.0, 8.0)], Rgba::rgb(0, 0, 0));
        assert_eq!(g.bounds(), Some(Rect::new(4.0, 0.0, 12.0, 50.0)));
    }

    #[test]
    fn test_set_text_reuses_buffer() {
        let mut t = Text::default();
        t.set_text("a fairly long clip name");
        t.set_text("short");
        assert_eq!(t.text(), "short");
    }
}
