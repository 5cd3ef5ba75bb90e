//! Coordinate transforms between bars, absolute timeline pixels and
//! viewport-relative pixels, plus viewport culling ranges.
//!
//! Everything here runs inside the per-frame hot path, so nothing panics:
//! a zero (or non-finite) scale yields a degenerate range or a `0` result
//! instead of a division by zero.

use crate::camera::Camera;

/// Inclusive range of bars intersecting the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BarRange {
    pub first_bar: u32,
    pub last_bar: u32,
}

impl BarRange {
    /// True when the half-open bar span `[start, start + duration)` touches this range.
    pub fn intersects(&self, start: f64, duration: f64) -> bool {
        let end = start + duration.max(0.0);
        end > self.first_bar as f64 && start <= self.last_bar as f64
    }
}

/// Inclusive range of track rows intersecting the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackRange {
    pub first_track: usize,
    pub last_track: usize,
}

impl TrackRange {
    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.first_track..=self.last_track
    }
}

#[inline]
pub fn bars_to_pixels(bar: f64, camera: &Camera) -> f64 {
    bar * camera.effective_pixels_per_bar()
}

/// Inverse of [`bars_to_pixels`]. Returns `0` when the effective scale is zero.
#[inline]
pub fn pixels_to_bars(px: f64, camera: &Camera) -> f64 {
    let ppb = camera.effective_pixels_per_bar();
    if ppb == 0.0 || !ppb.is_finite() {
        return 0.0;
    }
    px / ppb
}

#[inline]
pub fn bars_to_viewport_x(bar: f64, camera: &Camera) -> f64 {
    bars_to_pixels(bar, camera) - camera.scroll_x
}

#[inline]
pub fn viewport_x_to_bars(x: f64, camera: &Camera) -> f64 {
    pixels_to_bars(x + camera.scroll_x, camera)
}

#[inline]
pub fn track_index_to_absolute_y(index: usize, track_height: f64) -> f64 {
    index as f64 * track_height
}

/// Row under an absolute y coordinate. Returns `0` for a zero track height
/// and for positions above the first row.
#[inline]
pub fn absolute_y_to_track_index(y: f64, track_height: f64) -> usize {
    if track_height <= 0.0 || !track_height.is_finite() {
        return 0;
    }
    (y / track_height).floor().max(0.0) as usize
}

pub fn visible_bar_range(camera: &Camera, viewport_width_px: f64) -> BarRange {
    let ppb = camera.effective_pixels_per_bar();
    if ppb <= 0.0 || !ppb.is_finite() {
        return BarRange::default();
    }
    let first = (camera.scroll_x / ppb).floor().max(0.0);
    let last = ((camera.scroll_x + viewport_width_px.max(0.0)) / ppb).ceil().max(0.0);
    BarRange {
        first_bar: first as u32,
        last_bar: (last as u32).max(first as u32),
    }
}

pub fn visible_track_range(
    camera: &Camera,
    viewport_height_px: f64,
    track_height: f64,
    total_tracks: usize,
) -> TrackRange {
    if track_height <= 0.0 || !track_height.is_finite() || total_tracks == 0 {
        return TrackRange::default();
    }
    let max_index = total_tracks - 1;
    let first = (camera.scroll_y / track_height).floor().max(0.0) as usize;
    let last = ((camera.scroll_y + viewport_height_px.max(0.0)) / track_height)
        .ceil()
        .max(0.0) as usize;
    let last = last.min(max_index);
    TrackRange {
        first_track: first.min(last),
        last_track: last,
    }
}

/// Round `value` to the nearest multiple of `step`; `step == 0` leaves it unchanged.
#[inline]
pub fn snap_to_grid(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step).round() * step
}

#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
