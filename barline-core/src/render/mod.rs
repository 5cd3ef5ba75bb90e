//! The four draw functions. Each one clears its target and rebuilds it from
//! the camera and project data; none of them keeps state between calls.

mod clips;
mod grid;
mod playhead;
mod tracks;

pub use clips::update_clips;
pub use grid::draw_grid;
pub use playhead::{draw_playhead, PLAYHEAD_MARKER_HALF_WIDTH, PLAYHEAD_MARKER_HEIGHT};
pub use tracks::draw_track_backgrounds;

/// Drawable area in CSS pixels plus the device pixel ratio used for the
/// backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, pixel_ratio: 1.0 }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio > 0.0 && pixel_ratio.is_finite() { pixel_ratio } else { 1.0 };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio,
        }
    }

    /// Backing store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Align a line coordinate to the pixel grid so 1px strokes stay sharp.
#[inline]
pub(crate) fn crisp(v: f64) -> f64 {
    v.floor() + 0.5
}
