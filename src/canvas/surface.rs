use barline_core::render::Viewport;
use barline_core::scene::{ClipPool, LayerKind, Scene};
use barline_core::Surface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::painter::{CanvasPainter, StyleScratch};

fn get_canvas_ctx(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has an unexpected type"))
}

struct CanvasLayer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasLayer {
    fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = get_canvas_ctx(&canvas)?;
        Ok(Self { canvas, ctx })
    }

    fn resize(&self, viewport: &Viewport) {
        let (w, h) = viewport.backing_size();
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
    }

    /// Clear the whole backing store and leave a CSS-pixel transform in place.
    fn begin(&self, viewport: &Viewport) {
        let ctx = &self.ctx;
        let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        let dpr = viewport.pixel_ratio;
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        ctx.set_global_alpha(1.0);
        ctx.set_text_baseline("top");
    }

    fn release(&self) {
        self.canvas.set_width(0);
        self.canvas.set_height(0);
    }
}

/// Two stacked canvases: the static layers underneath, the playhead on a
/// transparent overlay, so a playhead frame never repaints clips.
pub struct WebSurface {
    base: CanvasLayer,
    overlay: CanvasLayer,
    viewport: Viewport,
    scratch: StyleScratch,
}

impl WebSurface {
    pub fn new(base: HtmlCanvasElement, overlay: HtmlCanvasElement) -> Result<Self, JsValue> {
        Ok(Self {
            base: CanvasLayer::new(base)?,
            overlay: CanvasLayer::new(overlay)?,
            viewport: Viewport::default(),
            scratch: StyleScratch::default(),
        })
    }
}

impl Surface for WebSurface {
    fn resize(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        self.base.resize(viewport);
        self.overlay.resize(viewport);
    }

    fn present_static(&mut self, scene: &Scene, pool: &ClipPool) {
        self.base.begin(&self.viewport);
        let mut painter = CanvasPainter::new(&self.base.ctx, &mut self.scratch);
        for kind in LayerKind::STATIC {
            scene.paint_layer(kind, pool, &mut painter);
        }
    }

    fn present_dynamic(&mut self, scene: &Scene, pool: &ClipPool) {
        self.overlay.begin(&self.viewport);
        let mut painter = CanvasPainter::new(&self.overlay.ctx, &mut self.scratch);
        scene.paint_layer(LayerKind::Playhead, pool, &mut painter);
    }

    fn destroy(&mut self) {
        self.base.release();
        self.overlay.release();
    }
}
