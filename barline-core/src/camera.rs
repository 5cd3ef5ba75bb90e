//! Camera state (scroll + zoom) and the store that owns it together with the
//! track/clip selection.
//!
//! The store is a plain value: the front end wraps it in a reactive cell and
//! every mutator reports whether anything changed, so a no-op gesture never
//! triggers a static redraw.

use crate::config::TimelineConfig;
use crate::model::{ClipId, TrackId};
use crate::transform::clamp;

pub const ZOOM_X_MIN: f64 = 0.05;
pub const ZOOM_X_MAX: f64 = 16.0;
pub const ZOOM_Y_MIN: f64 = 0.5;
pub const ZOOM_Y_MAX: f64 = 4.0;

pub const DEFAULT_PIXELS_PER_BAR: f64 = 120.0;
pub const DEFAULT_TRACK_HEIGHT: f64 = 80.0;

/// Visible window onto the timeline's virtual space.
///
/// `pixels_per_bar` is fixed for the lifetime of a camera; zooming scales it
/// through `zoom_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub zoom_x: f64,
    pub zoom_y: f64,
    pub pixels_per_bar: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::with_pixels_per_bar(DEFAULT_PIXELS_PER_BAR)
    }
}

impl Camera {
    pub fn with_pixels_per_bar(pixels_per_bar: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            zoom_x: 1.0,
            zoom_y: 1.0,
            pixels_per_bar,
        }
    }

    #[inline]
    pub fn effective_pixels_per_bar(&self) -> f64 {
        self.pixels_per_bar * self.zoom_x
    }
}

/// Current track/clip selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub track: Option<TrackId>,
    pub clip: Option<ClipId>,
}

/// Owns the camera and selection; all mutation goes through the clamped
/// operations below.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraStore {
    camera: Camera,
    base_track_height: f64,
    selection: Selection,
}

impl Default for CameraStore {
    fn default() -> Self {
        Self::new(DEFAULT_PIXELS_PER_BAR, DEFAULT_TRACK_HEIGHT)
    }
}

impl CameraStore {
    pub fn new(pixels_per_bar: f64, base_track_height: f64) -> Self {
        Self {
            camera: Camera::with_pixels_per_bar(pixels_per_bar),
            base_track_height,
            selection: Selection::default(),
        }
    }

    pub fn with_config(config: &TimelineConfig) -> Self {
        Self::new(config.pixels_per_bar, config.track_height)
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[inline]
    pub fn effective_pixels_per_bar(&self) -> f64 {
        self.camera.effective_pixels_per_bar()
    }

    /// Lane height after vertical zoom.
    #[inline]
    pub fn effective_track_height(&self) -> f64 {
        self.base_track_height * self.camera.zoom_y
    }

    pub fn set_scroll_x(&mut self, x: f64) -> bool {
        let next = non_negative(x);
        let changed = next != self.camera.scroll_x;
        self.camera.scroll_x = next;
        changed
    }

    pub fn set_scroll_y(&mut self, y: f64) -> bool {
        let next = non_negative(y);
        let changed = next != self.camera.scroll_y;
        self.camera.scroll_y = next;
        changed
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> bool {
        let moved_x = self.set_scroll_x(self.camera.scroll_x + dx);
        let moved_y = self.set_scroll_y(self.camera.scroll_y + dy);
        moved_x || moved_y
    }

    /// Zoom horizontally while keeping the bar under `focal_pixel_x` pinned
    /// to that pixel.
    pub fn zoom_x_at(&mut self, delta: f64, focal_pixel_x: f64) -> bool {
        let prev = self.camera.zoom_x;
        let next = clamp(prev + finite_or_zero(delta), ZOOM_X_MIN, ZOOM_X_MAX);
        if next == prev {
            return false;
        }

        let ppb = self.camera.pixels_per_bar;
        let prev_scale = ppb * prev;
        let focal_bar = if prev_scale > 0.0 {
            (self.camera.scroll_x + focal_pixel_x) / prev_scale
        } else {
            0.0
        };

        self.camera.zoom_x = next;
        self.camera.scroll_x = non_negative(focal_bar * ppb * next - focal_pixel_x);
        true
    }

    /// Scale lane height uniformly from the top; no focal point.
    pub fn zoom_y(&mut self, delta: f64) -> bool {
        let prev = self.camera.zoom_y;
        let next = clamp(prev + finite_or_zero(delta), ZOOM_Y_MIN, ZOOM_Y_MAX);
        if next == prev {
            return false;
        }
        self.camera.zoom_y = next;
        true
    }

    pub fn reset_camera(&mut self) -> bool {
        let fresh = Camera::with_pixels_per_bar(self.camera.pixels_per_bar);
        let changed = fresh != self.camera;
        self.camera = fresh;
        changed
    }

    /// Deselecting the track (`None`) also drops the clip selection.
    pub fn select_track(&mut self, track: Option<TrackId>) -> bool {
        let before = self.selection;
        self.selection.track = track;
        if track.is_none() {
            self.selection.clip = None;
        }
        before != self.selection
    }

    pub fn select_clip(&mut self, clip: Option<ClipId>) -> bool {
        let changed = self.selection.clip != clip;
        self.selection.clip = clip;
        changed
    }
}

// NaN would otherwise slip through `max(0.0)` comparisons as "no change".
#[inline]
fn non_negative(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.max(0.0)
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_never_negative() {
        let mut store = CameraStore::default();
        for v in [-1000.0, -0.5, 0.0, 12.0, f64::NAN, -f64::INFINITY] {
            store.set_scroll_x(v);
            store.set_scroll_y(v);
            assert!(store.camera().scroll_x >= 0.0);
            assert!(store.camera().scroll_y >= 0.0);
        }
    }

    #[test]
    fn test_scroll_has_no_upper_bound() {
        let mut store = CameraStore::default();
        assert!(store.set_scroll_x(1.0e9));
        assert_eq!(store.camera().scroll_x, 1.0e9);
    }

    #[test]
    fn test_scroll_by_reports_change() {
        let mut store = CameraStore::default();
        assert!(!store.scroll_by(-10.0, -10.0));
        assert!(store.scroll_by(25.0, 0.0));
        assert_eq!(store.camera().scroll_x, 25.0);
    }

    #[test]
    fn test_focal_point_scenario() {
        let mut store = CameraStore::new(120.0, 80.0);
        assert!(store.zoom_x_at(1.0, 240.0));
        assert_eq!(store.camera().zoom_x, 2.0);
        assert!((store.camera().scroll_x - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_focal_bar_stays_under_pointer() {
        let mut store = CameraStore::new(96.0, 80.0);
        store.set_scroll_x(517.0);
        let focal = 333.0;
        let before = crate::transform::viewport_x_to_bars(focal, store.camera());
        store.zoom_x_at(0.75, focal);
        let after = crate::transform::viewport_x_to_bars(focal, store.camera());
        assert!((before - after).abs() < 1e-9, "{before} vs {after}");
    }

    #[test]
    fn test_zoom_x_at_clamped_is_noop() {
        let mut store = CameraStore::default();
        assert!(store.zoom_x_at(100.0, 0.0));
        assert_eq!(store.camera().zoom_x, ZOOM_X_MAX);
        let snapshot = store.clone();
        assert!(!store.zoom_x_at(5.0, 400.0));
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_zoom_stays_in_range_for_any_delta_sequence() {
        let mut store = CameraStore::default();
        let deltas = [3.0, -0.7, 12.5, -40.0, 0.01, 7.0, -0.3, 1.0e6, -1.0e6, f64::NAN];
        for (i, d) in deltas.iter().cycle().take(200).enumerate() {
            store.zoom_x_at(*d, (i * 17 % 900) as f64);
            store.zoom_y(*d * 0.1);
            let cam = store.camera();
            assert!((ZOOM_X_MIN..=ZOOM_X_MAX).contains(&cam.zoom_x));
            assert!((ZOOM_Y_MIN..=ZOOM_Y_MAX).contains(&cam.zoom_y));
            assert!(cam.scroll_x >= 0.0);
        }
    }

    #[test]
    fn test_zoom_y_scales_track_height() {
        let mut store = CameraStore::new(120.0, 80.0);
        assert!(store.zoom_y(0.5));
        assert_eq!(store.effective_track_height(), 120.0);
        assert!(store.zoom_y(-100.0));
        assert_eq!(store.camera().zoom_y, ZOOM_Y_MIN);
    }

    #[test]
    fn test_reset_camera_restores_defaults() {
        let mut store = CameraStore::new(64.0, 80.0);
        store.set_scroll_x(900.0);
        store.zoom_x_at(2.0, 100.0);
        store.zoom_y(1.0);
        assert!(store.reset_camera());
        assert_eq!(*store.camera(), Camera::with_pixels_per_bar(64.0));
        assert!(!store.reset_camera());
    }

    #[test]
    fn test_deselecting_track_clears_clip() {
        let mut store = CameraStore::default();
        store.select_track(Some(TrackId(3)));
        store.select_clip(Some(ClipId(11)));
        assert_eq!(store.selection().clip, Some(ClipId(11)));

        // switching tracks keeps the clip
        store.select_track(Some(TrackId(4)));
        assert_eq!(store.selection().clip, Some(ClipId(11)));

        assert!(store.select_track(None));
        assert_eq!(store.selection(), Selection::default());
    }

    #[test]
    fn test_select_clip_is_independent() {
        let mut store = CameraStore::default();
        assert!(store.select_clip(Some(ClipId(1))));
        assert_eq!(store.selection().track, None);
        assert!(!store.select_clip(Some(ClipId(1))));
    }
}
