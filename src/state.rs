use barline_core::{CameraStore, HostStats, TimelineConfig, Track};
use leptos::prelude::*;

use crate::transport::DemoTransport;

/// Shared reactive state for the timeline page, provided as context.
#[derive(Clone, Copy)]
pub struct TimelineState {
    /// Camera and selection. Mutate through `maybe_update` with the store's
    /// returned "changed" flag so no-op gestures do not trigger a redraw.
    pub camera: RwSignal<CameraStore>,
    pub tracks: RwSignal<Vec<Track>>,
    pub config: RwSignal<TimelineConfig>,
    pub transport: RwSignal<DemoTransport>,
    /// Published by the canvas host after each static redraw.
    pub stats: RwSignal<HostStats>,
}

impl TimelineState {
    pub fn new(config: TimelineConfig, tracks: Vec<Track>, transport: DemoTransport) -> Self {
        Self {
            camera: RwSignal::new(CameraStore::with_config(&config)),
            tracks: RwSignal::new(tracks),
            config: RwSignal::new(config),
            transport: RwSignal::new(transport),
            stats: RwSignal::new(HostStats::default()),
        }
    }

    /// Apply a camera mutation; subscribers are notified only when it reports a change.
    pub fn mutate_camera(&self, f: impl FnOnce(&mut CameraStore) -> bool) -> bool {
        let mut changed = false;
        self.camera.maybe_update(|store| {
            changed = f(store);
            changed
        });
        changed
    }
}

/// `performance.now()` in milliseconds, or 0 outside a browser.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
