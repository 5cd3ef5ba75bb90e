use super::Viewport;
use crate::camera::CameraStore;
use crate::config::TimelineConfig;
use crate::model::{track_index, Track};
use crate::scene::{ClipPool, Layer, Rect};
use crate::transform::{bars_to_viewport_x, track_index_to_absolute_y, visible_bar_range, visible_track_range};

/// Clips narrower than this are not drawn.
const MIN_CLIP_WIDTH_PX: f64 = 1.0;

const MUTED_DESATURATION: f32 = 0.6;

/// Rebuild the clip layer from scratch.
///
/// Every pool entry is released first, then one is claimed per clip that
/// falls inside the visible bar and track ranges. The layer's children are
/// exactly the claimed entries afterwards. Returns how many clips are shown.
pub fn update_clips(
    layer: &mut Layer,
    pool: &mut ClipPool,
    store: &CameraStore,
    viewport: &Viewport,
    tracks: &[Track],
    config: &TimelineConfig,
) -> usize {
    pool.release_all();
    layer.clear_children();
    if tracks.is_empty() || viewport.is_empty() {
        return 0;
    }

    let camera = store.camera();
    let ppb = camera.effective_pixels_per_bar();
    let track_height = store.effective_track_height();
    let bars = visible_bar_range(camera, viewport.width);
    let rows = visible_track_range(camera, viewport.height, track_height, tracks.len());
    let selection = store.selection();
    let selected_row = selection.track.and_then(|id| track_index(tracks, id));
    let style = &config.clip;

    let pad = style.lane_padding.min(track_height * 0.25);
    let body_h = (track_height - 2.0 * pad).max(1.0);

    let mut shown = 0;
    for row in rows.iter() {
        let track = &tracks[row];
        let body_y = track_index_to_absolute_y(row, track_height) - camera.scroll_y + pad;
        let base_alpha = if selected_row == Some(row) {
            style.selected_track_opacity
        } else {
            style.opacity
        };

        for clip in &track.clips {
            if !bars.intersects(clip.start_bar, clip.duration_bars) {
                continue;
            }
            let x = bars_to_viewport_x(clip.start_bar, camera);
            let w = clip.duration_bars * ppb;
            if w.is_nan() || w < MIN_CLIP_WIDTH_PX || x > viewport.width || x + w < 0.0 {
                continue;
            }

            let mut color = clip.color.unwrap_or_else(|| config.theme.lane_color(track.kind));
            let mut alpha = base_alpha;
            if clip.muted {
                color = color.desaturate(MUTED_DESATURATION);
                alpha *= style.muted_opacity;
            }

            let rect = Rect::new(x, body_y, w, body_h);
            let (id, entry) = pool.acquire();

            entry.body.clear();
            entry.body.alpha = alpha;
            entry.body.fill_round_rect(rect, style.corner_radius, color);
            if selection.clip == Some(clip.id) {
                entry.body.stroke_rect(rect, style.selected_outline, 1.0);
            }

            // sticky: pinned to the left edge while the clip start is scrolled off
            let label = &mut entry.label;
            label.set_text(&clip.name);
            label.x = x.max(0.0) + style.label_padding;
            label.y = body_y + style.label_padding * 0.5;
            label.font_px = style.label_font_px;
            label.color = style.label_color;
            label.alpha = if clip.muted { style.muted_opacity } else { 1.0 };

            entry.label_mask.clear();
            entry.label_mask.fill_rect(rect, style.label_color);

            layer.add_child(id);
            shown += 1;
        }
    }
    shown
}
