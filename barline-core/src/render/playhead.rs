use super::{crisp, Viewport};
use crate::camera::Camera;
use crate::config::Theme;
use crate::scene::Graphics;
use crate::transform::bars_to_viewport_x;

pub const PLAYHEAD_MARKER_HALF_WIDTH: f64 = 6.0;
pub const PLAYHEAD_MARKER_HEIGHT: f64 = 8.0;

/// Vertical cursor with a downward marker at the top. Runs every display
/// frame, so it only rewrites a handful of commands into `g`.
pub fn draw_playhead(g: &mut Graphics, camera: &Camera, viewport: &Viewport, position_bars: f64, theme: &Theme) {
    g.clear();
    let x = bars_to_viewport_x(position_bars, camera);
    let on_screen = x.is_finite()
        && !viewport.is_empty()
        && x >= -PLAYHEAD_MARKER_HALF_WIDTH
        && x <= viewport.width + PLAYHEAD_MARKER_HALF_WIDTH;
    g.visible = on_screen;
    if !on_screen {
        return;
    }

    let cx = crisp(x);
    g.line((cx, 0.0), (cx, viewport.height), theme.playhead, 1.0);
    g.fill_triangle(
        [
            (cx - PLAYHEAD_MARKER_HALF_WIDTH, 0.0),
            (cx + PLAYHEAD_MARKER_HALF_WIDTH, 0.0),
            (cx, PLAYHEAD_MARKER_HEIGHT),
        ],
        theme.playhead,
    );
}
