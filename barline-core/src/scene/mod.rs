//! Retained scene: four fixed layers of [`Graphics`] plus pooled clip visuals,
//! replayed into a [`Painter`] by whatever surface presents them.

mod graphics;
mod pool;
pub mod recording;

pub use graphics::{DrawCmd, Graphics, Rect, Text};
pub use pool::{ClipPool, EntryId, PoolEntry};

use crate::color::Rgba;

/// Backend seam. A surface implements this over its native 2D API.
pub trait Painter {
    fn set_alpha(&mut self, alpha: f32);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f64);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64);
    fn fill_triangle(&mut self, points: [(f64, f64); 3], color: Rgba);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: Rgba);
    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);
}

/// Layers in z-order, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    TrackBackgrounds,
    Grid,
    Clips,
    Playhead,
}

impl LayerKind {
    pub const ALL: [LayerKind; 4] = [
        LayerKind::TrackBackgrounds,
        LayerKind::Grid,
        LayerKind::Clips,
        LayerKind::Playhead,
    ];

    /// Layers redrawn by the change-driven cadence.
    pub const STATIC: [LayerKind; 3] = [LayerKind::TrackBackgrounds, LayerKind::Grid, LayerKind::Clips];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug)]
pub struct Layer {
    kind: LayerKind,
    pub graphics: Graphics,
    children: Vec<EntryId>,
}

impl Layer {
    fn new(kind: LayerKind) -> Self {
        Self { kind, graphics: Graphics::new(), children: Vec::new() }
    }

    #[inline]
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn add_child(&mut self, id: EntryId) {
        self.children.push(id);
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    #[inline]
    pub fn children(&self) -> &[EntryId] {
        &self.children
    }
}

#[derive(Debug)]
pub struct Scene {
    layers: [Layer; 4],
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self { layers: LayerKind::ALL.map(Layer::new) }
    }

    #[inline]
    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind.index()]
    }

    #[inline]
    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        &mut self.layers[kind.index()]
    }

    /// Layers back to front.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Replay one layer: its own graphics first, then pooled children in order.
    pub fn paint_layer<P: Painter + ?Sized>(&self, kind: LayerKind, pool: &ClipPool, painter: &mut P) {
        let layer = self.layer(kind);
        paint_graphics(&layer.graphics, painter);
        for &id in layer.children() {
            let Some(entry) = pool.get(id) else { continue };
            if !entry.in_use() {
                continue;
            }
            paint_graphics(&entry.body, painter);
            paint_label(entry, painter);
        }
    }

    pub fn destroy(&mut self) {
        for layer in &mut self.layers {
            layer.graphics.destroy();
            layer.children = Vec::new();
        }
    }
}

fn paint_graphics<P: Painter + ?Sized>(g: &Graphics, painter: &mut P) {
    if !g.visible || g.is_empty() || g.alpha <= 0.0 {
        return;
    }
    painter.set_alpha(g.alpha);
    for cmd in g.commands() {
        match *cmd {
            DrawCmd::FillRect { rect, color } => painter.fill_rect(rect, color),
            DrawCmd::FillRoundRect { rect, radius, color } => painter.fill_round_rect(rect, radius, color),
            DrawCmd::StrokeRect { rect, color, width } => painter.stroke_rect(rect, color, width),
            DrawCmd::Line { from, to, color, width } => painter.line(from, to, color, width),
            DrawCmd::FillTriangle { points, color } => painter.fill_triangle(points, color),
        }
    }
    painter.set_alpha(1.0);
}

fn paint_label<P: Painter + ?Sized>(entry: &PoolEntry, painter: &mut P) {
    let label = &entry.label;
    if !label.visible || label.text().is_empty() {
        return;
    }
    let mask = entry.label_mask.visible.then(|| entry.label_mask.bounds()).flatten();
    if let Some(rect) = mask {
        painter.push_clip(rect);
    }
    painter.set_alpha(label.alpha);
    painter.fill_text(label.text(), label.x, label.y, label.font_px, label.color);
    painter.set_alpha(1.0);
    if mask.is_some() {
        painter.pop_clip();
    }
}
