//! Gesture mapping for the timeline: wheel events become camera actions and
//! middle-button drags become absolute scroll positions.
//!
//! Nothing in here touches the DOM. The browser binding copies the relevant
//! event fields into these types and applies the result to the store it
//! reads at event time.

use crate::camera::{Camera, CameraStore};
use crate::model::{ClipId, Track, TrackId};
use crate::transform::{absolute_y_to_track_index, viewport_x_to_bars};

/// Fields of a wheel event that matter for navigation. Deltas are in CSS
/// pixels; `pointer_x` is relative to the timeline's left edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub pointer_x: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraAction {
    ZoomXAt { delta: f64, focal_x: f64 },
    ZoomY { delta: f64 },
    ScrollBy { dx: f64, dy: f64 },
}

impl CameraAction {
    /// Apply to the store. Returns whether the camera changed.
    pub fn apply(self, store: &mut CameraStore) -> bool {
        match self {
            CameraAction::ZoomXAt { delta, focal_x } => store.zoom_x_at(delta, focal_x),
            CameraAction::ZoomY { delta } => store.zoom_y(delta),
            CameraAction::ScrollBy { dx, dy } => store.scroll_by(dx, dy),
        }
    }
}

/// Map a wheel event to a camera action.
///
/// Modifiers are checked most specific first: ctrl+shift zooms vertically,
/// ctrl or meta zooms horizontally around the pointer, shift turns vertical
/// wheel motion into horizontal scroll.
pub fn classify_wheel(input: &WheelInput, zoom_sensitivity: f64) -> CameraAction {
    let zoom_delta = -input.delta_y * zoom_sensitivity;
    if input.ctrl && input.shift {
        CameraAction::ZoomY { delta: zoom_delta }
    } else if input.ctrl || input.meta {
        CameraAction::ZoomXAt { delta: zoom_delta, focal_x: input.pointer_x }
    } else if input.shift {
        CameraAction::ScrollBy { dx: input.delta_y, dy: 0.0 }
    } else {
        CameraAction::ScrollBy { dx: input.delta_x, dy: input.delta_y }
    }
}

/// Pointer button that starts a pan.
pub const PAN_BUTTON: i16 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
struct PanAnchor {
    pointer_id: i32,
    pointer: (f64, f64),
    scroll: (f64, f64),
}

/// Middle-button drag state.
///
/// The scroll position while dragging is always computed from the anchor
/// taken at button-down, so dropped move events never accumulate drift.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanController {
    anchor: Option<PanAnchor>,
}

impl PanController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_panning(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start a pan. Returns `false` (and ignores the press) for any button
    /// other than [`PAN_BUTTON`] or while a pan is already running.
    pub fn pointer_down(&mut self, button: i16, pointer_id: i32, x: f64, y: f64, camera: &Camera) -> bool {
        if button != PAN_BUTTON || self.anchor.is_some() {
            return false;
        }
        self.anchor = Some(PanAnchor {
            pointer_id,
            pointer: (x, y),
            scroll: (camera.scroll_x, camera.scroll_y),
        });
        true
    }

    /// Scroll target for the current pointer position, or `None` when this
    /// pointer is not panning.
    pub fn pointer_move(&self, pointer_id: i32, x: f64, y: f64) -> Option<(f64, f64)> {
        let anchor = self.anchor.filter(|a| a.pointer_id == pointer_id)?;
        Some((
            anchor.scroll.0 - (x - anchor.pointer.0),
            anchor.scroll.1 - (y - anchor.pointer.1),
        ))
    }

    /// End the pan. Returns `true` when this pointer owned it, so the
    /// caller knows to release pointer capture.
    pub fn pointer_up(&mut self, pointer_id: i32) -> bool {
        match self.anchor {
            Some(a) if a.pointer_id == pointer_id => {
                self.anchor = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.anchor = None;
    }
}

/// Apply a pan target to the store through the clamped setters.
pub fn apply_pan(store: &mut CameraStore, target: (f64, f64)) -> bool {
    let moved_x = store.set_scroll_x(target.0);
    let moved_y = store.set_scroll_y(target.1);
    moved_x || moved_y
}

/// What sits under a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub track: TrackId,
    pub clip: Option<ClipId>,
}

/// Track row and clip under a viewport point. Later clips win where clips
/// overlap, matching paint order.
pub fn hit_test(store: &CameraStore, tracks: &[Track], x: f64, y: f64) -> Option<Hit> {
    let track_height = store.effective_track_height();
    if y < 0.0 || track_height <= 0.0 {
        return None;
    }
    let camera = store.camera();
    let row = absolute_y_to_track_index(y + camera.scroll_y, track_height);
    let track = tracks.get(row)?;
    let bar = viewport_x_to_bars(x, camera);
    let clip = track
        .clips
        .iter()
        .rev()
        .find(|c| bar >= c.start_bar && bar < c.end_bar())
        .map(|c| c.id);
    Some(Hit { track: track.id, clip })
}

/// Click selection: a hit selects its track and clip (or clears the clip
/// on empty lane space), a miss clears everything.
pub fn select_hit(store: &mut CameraStore, hit: Option<Hit>) -> bool {
    match hit {
        Some(hit) => {
            let track_changed = store.select_track(Some(hit.track));
            let clip_changed = store.select_clip(hit.clip);
            track_changed || clip_changed
        }
        None => store.select_track(None),
    }
}
