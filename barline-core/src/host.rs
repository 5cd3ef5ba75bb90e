//! Host lifecycle and the two redraw cadences.
//!
//! A [`TimelineHost`] owns the retained scene and the clip pool. The drawing
//! surface arrives later through [`TimelineHost::attach`] because the browser
//! side has to wait for fonts before anything can be measured. Until then
//! every redraw or resize is accepted and remembered but does nothing.
//!
//! Static redraws rebuild the background, grid and clip layers and run only
//! when the camera, the project data or the selection changed. Dynamic
//! redraws rebuild the playhead layer only and run every display frame.

use crate::camera::{Camera, CameraStore};
use crate::config::TimelineConfig;
use crate::model::Track;
use crate::render::{draw_grid, draw_playhead, draw_track_backgrounds, update_clips, Viewport};
use crate::scene::{ClipPool, LayerKind, Scene};

/// What the host draws into. Implemented over a concrete 2D backend.
pub trait Surface {
    /// Resize the backing store to `viewport.backing_size()`.
    fn resize(&mut self, viewport: &Viewport);
    /// Present [`LayerKind::STATIC`].
    fn present_static(&mut self, scene: &Scene, pool: &ClipPool);
    /// Present the playhead layer only.
    fn present_dynamic(&mut self, scene: &Scene, pool: &ClipPool);
    fn destroy(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostStats {
    pub static_redraws: u64,
    pub dynamic_redraws: u64,
    /// Clip visuals currently allocated, claimed or not.
    pub pool_size: usize,
    pub visible_clips: usize,
    pub peak_visible_clips: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Ready,
    TornDown,
}

pub struct TimelineHost<S: Surface> {
    config: TimelineConfig,
    scene: Scene,
    pool: ClipPool,
    viewport: Viewport,
    surface: Option<S>,
    phase: Phase,
    static_pending: bool,
    stats: HostStats,
}

impl<S: Surface> TimelineHost<S> {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            pool: ClipPool::new(),
            viewport: Viewport::default(),
            surface: None,
            phase: Phase::Pending,
            static_pending: false,
            stats: HostStats::default(),
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.phase == Phase::TornDown
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[inline]
    pub fn stats(&self) -> HostStats {
        self.stats
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn pool(&self) -> &ClipPool {
        &self.pool
    }

    /// A static redraw was requested while the host could not draw, or the
    /// viewport or config changed since the last one.
    #[inline]
    pub fn needs_static_redraw(&self) -> bool {
        self.static_pending
    }

    /// Finish initialization with a ready surface. The last viewport seen
    /// before this call is applied to it right away. Returns `false` if the
    /// host was already attached or torn down; the surface is dropped then.
    pub fn attach(&mut self, mut surface: S) -> bool {
        if self.phase != Phase::Pending {
            log::warn!("timeline host: attach ignored in {:?} state", self.phase);
            return false;
        }
        if !self.viewport.is_empty() {
            surface.resize(&self.viewport);
        }
        self.surface = Some(surface);
        self.phase = Phase::Ready;
        self.static_pending = true;
        log::info!(
            "timeline host attached ({}x{} @{}x)",
            self.viewport.width,
            self.viewport.height,
            self.viewport.pixel_ratio
        );
        true
    }

    /// Record the new size, resize the surface's backing store and redraw
    /// the static layers. Before attach only the size is remembered.
    pub fn resize(&mut self, viewport: Viewport, store: &CameraStore, tracks: &[Track]) {
        if self.phase == Phase::TornDown || viewport == self.viewport {
            return;
        }
        log::debug!(
            "timeline resize {}x{} -> {}x{} @{}x",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
        self.viewport = viewport;
        self.static_pending = true;
        let Some(surface) = self.surface.as_mut() else { return };
        surface.resize(&viewport);
        self.redraw_static(store, tracks);
    }

    /// Replace the configuration; takes effect on the next static redraw.
    pub fn set_config(&mut self, config: TimelineConfig) {
        if config != self.config {
            self.config = config;
            self.static_pending = true;
        }
    }

    /// Rebuild track backgrounds, grid and clips and present them.
    /// Returns whether anything was presented.
    pub fn redraw_static(&mut self, store: &CameraStore, tracks: &[Track]) -> bool {
        if self.phase == Phase::TornDown {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            self.static_pending = true;
            return false;
        };
        self.static_pending = false;

        let camera = store.camera();
        draw_track_backgrounds(
            &mut self.scene.layer_mut(LayerKind::TrackBackgrounds).graphics,
            store,
            &self.viewport,
            &self.config.theme,
            tracks,
        );
        draw_grid(&mut self.scene.layer_mut(LayerKind::Grid).graphics, camera, &self.viewport, &self.config);

        let grown_from = self.pool.len();
        let visible = update_clips(
            self.scene.layer_mut(LayerKind::Clips),
            &mut self.pool,
            store,
            &self.viewport,
            tracks,
            &self.config,
        );
        if self.pool.len() > grown_from {
            log::debug!("clip pool grew {} -> {}", grown_from, self.pool.len());
        }

        surface.present_static(&self.scene, &self.pool);

        self.stats.static_redraws += 1;
        self.stats.visible_clips = visible;
        self.stats.peak_visible_clips = self.stats.peak_visible_clips.max(visible);
        self.stats.pool_size = self.pool.len();
        true
    }

    /// Move the playhead to `position_bars` and present it. Meant to run once
    /// per display frame.
    pub fn redraw_dynamic(&mut self, camera: &Camera, position_bars: f64) -> bool {
        let Some(surface) = self.surface.as_mut() else { return false };
        if self.phase != Phase::Ready {
            return false;
        }
        draw_playhead(
            &mut self.scene.layer_mut(LayerKind::Playhead).graphics,
            camera,
            &self.viewport,
            position_bars,
            &self.config.theme,
        );
        surface.present_dynamic(&self.scene, &self.pool);
        self.stats.dynamic_redraws += 1;
        true
    }

    /// Destroy the surface and every retained object. Only the first call
    /// does anything.
    pub fn teardown(&mut self) -> bool {
        if self.phase == Phase::TornDown {
            return false;
        }
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
        }
        self.scene.destroy();
        self.pool.destroy();
        self.phase = Phase::TornDown;
        self.static_pending = false;
        self.stats.pool_size = 0;
        self.stats.visible_clips = 0;
        log::info!(
            "timeline host torn down after {} static / {} dynamic redraws",
            self.stats.static_redraws,
            self.stats.dynamic_redraws
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::model::{Clip, ClipId, LaneKind, TrackId};
    use crate::scene::recording::{PaintOp, RecordingPainter};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Event {
        Resize((u32, u32)),
        Static { clip_bodies: usize, lines: usize },
        Dynamic { ops: Vec<PaintOp> },
        Destroy,
    }

    #[derive(Clone, Default)]
    struct RecordingSurface {
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, viewport: &Viewport) {
            self.events.borrow_mut().push(Event::Resize(viewport.backing_size()));
        }

        fn present_static(&mut self, scene: &Scene, pool: &ClipPool) {
            let mut painter = RecordingPainter::default();
            for kind in LayerKind::STATIC {
                scene.paint_layer(kind, pool, &mut painter);
            }
            let clip_bodies = painter.count(|op| matches!(op, PaintOp::FillRoundRect { .. }));
            let lines = painter.count(|op| matches!(op, PaintOp::Line { .. }));
            self.events.borrow_mut().push(Event::Static { clip_bodies, lines });
        }

        fn present_dynamic(&mut self, scene: &Scene, pool: &ClipPool) {
            let mut painter = RecordingPainter::default();
            scene.paint_layer(LayerKind::Playhead, pool, &mut painter);
            self.events.borrow_mut().push(Event::Dynamic { ops: painter.ops });
        }

        fn destroy(&mut self) {
            self.events.borrow_mut().push(Event::Destroy);
        }
    }

    fn project(clips_per_track: u64) -> Vec<Track> {
        (0..6)
            .map(|t| Track {
                id: TrackId(t),
                name: format!("Track {t}"),
                color: Rgba::rgb(80, 80, 80),
                kind: LaneKind::Audio,
                clips: (0..clips_per_track)
                    .map(|c| Clip {
                        id: ClipId(t * 1000 + c),
                        start_bar: c as f64,
                        duration_bars: 1.0,
                        color: None,
                        muted: false,
                        name: format!("{t}.{c}"),
                    })
                    .collect(),
            })
            .collect()
    }

    fn viewport() -> Viewport {
        Viewport::new(480.0, 240.0, 2.0)
    }

    #[test]
    fn test_noop_before_attach() {
        let store = CameraStore::default();
        let tracks = project(8);
        let mut host = TimelineHost::<RecordingSurface>::new(TimelineConfig::default());

        host.resize(viewport(), &store, &tracks);
        assert!(!host.redraw_static(&store, &tracks));
        assert!(!host.redraw_dynamic(store.camera(), 1.0));
        assert!(host.needs_static_redraw());
        assert_eq!(host.stats(), HostStats::default());
        assert_eq!(host.viewport(), viewport());
    }

    #[test]
    fn test_attach_applies_deferred_resize() {
        let store = CameraStore::default();
        let tracks = project(8);
        let surface = RecordingSurface::default();
        let events = surface.events.clone();
        let mut host = TimelineHost::new(TimelineConfig::default());

        host.resize(viewport(), &store, &tracks);
        assert!(host.attach(surface));
        assert_eq!(*events.borrow(), vec![Event::Resize((960, 480))]);
        assert!(host.needs_static_redraw());

        assert!(host.redraw_static(&store, &tracks));
        assert!(!host.needs_static_redraw());
        assert!(!host.attach(RecordingSurface::default()));
    }

    #[test]
    fn test_resize_redraws_static_layers() {
        let store = CameraStore::default();
        let tracks = project(8);
        let surface = RecordingSurface::default();
        let events = surface.events.clone();
        let mut host = TimelineHost::new(TimelineConfig::default());
        host.attach(surface);

        host.resize(Viewport::new(600.0, 300.0, 1.0), &store, &tracks);
        let log = events.borrow();
        assert_eq!(log[0], Event::Resize((600, 300)));
        assert!(matches!(log[1], Event::Static { .. }));
        drop(log);

        // same size again is not a resize
        host.resize(Viewport::new(600.0, 300.0, 1.0), &store, &tracks);
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_dynamic_redraw_touches_playhead_only() {
        let store = CameraStore::default();
        let tracks = project(8);
        let surface = RecordingSurface::default();
        let events = surface.events.clone();
        let mut host = TimelineHost::new(TimelineConfig::default());
        host.resize(viewport(), &store, &tracks);
        host.attach(surface);
        host.redraw_static(&store, &tracks);
        events.borrow_mut().clear();

        for frame in 0..30 {
            assert!(host.redraw_dynamic(store.camera(), frame as f64 * 0.1));
        }
        let log = events.borrow();
        assert_eq!(log.len(), 30);
        for event in log.iter() {
            let Event::Dynamic { ops } = event else { panic!("unexpected {event:?}") };
            assert!(ops.iter().all(|op| matches!(
                op,
                PaintOp::Alpha(_) | PaintOp::Line { .. } | PaintOp::Triangle { .. }
            )));
        }
        let stats = host.stats();
        assert_eq!(stats.static_redraws, 1);
        assert_eq!(stats.dynamic_redraws, 30);
    }

    #[test]
    fn test_static_redraw_presents_visible_clips() {
        let store = CameraStore::default();
        let tracks = project(20);
        let surface = RecordingSurface::default();
        let events = surface.events.clone();
        let mut host = TimelineHost::new(TimelineConfig::default());
        host.resize(viewport(), &store, &tracks);
        host.attach(surface);
        host.redraw_static(&store, &tracks);

        // bars 0..=4 on rows 0..=3: five clips per row
        let log = events.borrow();
        let Some(Event::Static { clip_bodies, lines }) = log.last() else { panic!() };
        assert_eq!(*clip_bodies, 4 * 5);
        assert!(*lines > 0);
        assert_eq!(host.stats().visible_clips, 20);
    }

    #[test]
    fn test_pool_bounded_by_peak_across_redraws() {
        let mut store = CameraStore::default();
        let tracks = project(300);
        let mut host = TimelineHost::new(TimelineConfig::default());
        host.resize(viewport(), &store, &tracks);
        host.attach(RecordingSurface::default());

        for step in 0..60 {
            store.set_scroll_x(step as f64 * 97.0);
            store.set_scroll_y((step % 5) as f64 * 40.0);
            if step % 9 == 0 {
                store.zoom_x_at(if step % 2 == 0 { -0.3 } else { 0.5 }, 100.0);
            }
            host.redraw_static(&store, &tracks);
            let stats = host.stats();
            assert!(stats.pool_size <= stats.peak_visible_clips);
            assert_eq!(host.pool().in_use(), stats.visible_clips);
        }
    }

    #[test]
    fn test_teardown_once() {
        let store = CameraStore::default();
        let tracks = project(8);
        let surface = RecordingSurface::default();
        let events = surface.events.clone();
        let mut host = TimelineHost::new(TimelineConfig::default());
        host.resize(viewport(), &store, &tracks);
        host.attach(surface);
        host.redraw_static(&store, &tracks);

        assert!(host.teardown());
        assert!(!host.teardown());
        assert_eq!(events.borrow().iter().filter(|e| **e == Event::Destroy).count(), 1);
        assert!(host.pool().is_empty());

        events.borrow_mut().clear();
        assert!(!host.redraw_static(&store, &tracks));
        assert!(!host.redraw_dynamic(store.camera(), 0.0));
        host.resize(Viewport::new(100.0, 100.0, 1.0), &store, &tracks);
        assert!(events.borrow().is_empty());
        assert!(!host.needs_static_redraw());
    }

    #[test]
    fn test_teardown_before_attach() {
        let mut host = TimelineHost::<RecordingSurface>::new(TimelineConfig::default());
        assert!(host.teardown());
        assert!(!host.attach(RecordingSurface::default()));
        assert!(host.is_torn_down());
    }

    #[test]
    fn test_config_change_marks_static_pending() {
        let store = CameraStore::default();
        let tracks = project(1);
        let mut host = TimelineHost::new(TimelineConfig::default());
        host.resize(viewport(), &store, &tracks);
        host.attach(RecordingSurface::default());
        host.redraw_static(&store, &tracks);

        let mut config = TimelineConfig::default();
        config.beats_per_bar = 3;
        host.set_config(config);
        assert!(host.needs_static_redraw());
        assert_eq!(host.config().beats_per_bar, 3);
    }
}
