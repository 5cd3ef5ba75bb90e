use super::{crisp, Viewport};
use crate::camera::Camera;
use crate::config::TimelineConfig;
use crate::scene::Graphics;
use crate::transform::{bars_to_viewport_x, visible_bar_range};

/// Closest two bar lines may get; denser grids skip bars.
pub const MIN_BAR_LINE_SPACING_PX: f64 = 4.0;

/// Bars between drawn bar lines: the smallest power of two that keeps lines
/// at least [`MIN_BAR_LINE_SPACING_PX`] apart.
fn bar_step(ppb: f64) -> u32 {
    let mut step = 1u32;
    while ppb * (step as f64) < MIN_BAR_LINE_SPACING_PX && step < 1 << 30 {
        step *= 2;
    }
    step
}

/// Bar lines for the visible bars (thinned when zoomed far out), plus beat
/// lines once a beat is wide enough to read.
pub fn draw_grid(g: &mut Graphics, camera: &Camera, viewport: &Viewport, config: &TimelineConfig) {
    g.clear();
    let ppb = camera.effective_pixels_per_bar();
    if ppb <= 0.0 || viewport.is_empty() {
        return;
    }

    let theme = &config.theme;
    let range = visible_bar_range(camera, viewport.width);
    let beats = config.beats_per_bar.max(1);
    let beat_px = ppb / beats as f64;
    let draw_beats = beats > 1 && beat_px > config.beat_line_min_px;

    let step = bar_step(ppb);
    // multiples of the step, so lines stay put while scrolling
    let first = range.first_bar / step * step;
    for bar in (first..=range.last_bar).step_by(step as usize) {
        let x = bars_to_viewport_x(bar as f64, camera);
        if x >= 0.0 && x <= viewport.width {
            let cx = crisp(x);
            g.line((cx, 0.0), (cx, viewport.height), theme.bar_line, 1.0);
        }
        if !draw_beats {
            continue;
        }
        for beat in 1..beats {
            let bx = x + beat as f64 * beat_px;
            if bx < 0.0 || bx > viewport.width {
                continue;
            }
            let cx = crisp(bx);
            g.line((cx, 0.0), (cx, viewport.height), theme.beat_line, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    fn lines_with(g: &Graphics, color: crate::color::Rgba) -> Vec<f64> {
        g.commands()
            .iter()
            .filter_map(|cmd| match *cmd {
                DrawCmd::Line { from, color: c, .. } if c == color => Some(from.0),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_one_line_per_visible_bar() {
        let config = TimelineConfig::default();
        let camera = Camera::with_pixels_per_bar(120.0);
        let mut g = Graphics::new();
        draw_grid(&mut g, &camera, &Viewport::new(480.0, 200.0, 1.0), &config);
        let bars = lines_with(&g, config.theme.bar_line);
        assert_eq!(bars, vec![0.5, 120.5, 240.5, 360.5, 480.5]);
    }

    #[test]
    fn test_beat_lines_only_when_legible() {
        let config = TimelineConfig::default();
        let mut camera = Camera::with_pixels_per_bar(120.0);
        let viewport = Viewport::new(480.0, 200.0, 1.0);
        let mut g = Graphics::new();

        // 30 px per beat: legible
        draw_grid(&mut g, &camera, &viewport, &config);
        assert_eq!(lines_with(&g, config.theme.beat_line).len(), 4 * 3);

        // 120 * 0.1 / 4 = 3 px per beat: too dense
        camera.zoom_x = 0.1;
        draw_grid(&mut g, &camera, &viewport, &config);
        assert!(lines_with(&g, config.theme.beat_line).is_empty());
        assert!(!lines_with(&g, config.theme.bar_line).is_empty());
    }

    #[test]
    fn test_redraw_replaces_previous_lines() {
        let config = TimelineConfig::default();
        let mut camera = Camera::with_pixels_per_bar(120.0);
        let viewport = Viewport::new(480.0, 200.0, 1.0);
        let mut g = Graphics::new();
        draw_grid(&mut g, &camera, &viewport, &config);
        let first = g.commands().len();
        camera.scroll_x = 60.0;
        draw_grid(&mut g, &camera, &viewport, &config);
        draw_grid(&mut g, &camera, &viewport, &config);
        assert!(g.commands().len() <= first + 4);
        let bars = lines_with(&g, config.theme.bar_line);
        assert_eq!(bars.first().copied(), Some(60.5));
    }

    #[test]
    fn test_bar_lines_thinned_when_dense() {
        let config = TimelineConfig::default();
        let mut camera = Camera::with_pixels_per_bar(1.0);
        camera.zoom_x = 0.05;
        camera.scroll_x = 333.0;
        let viewport = Viewport::new(1920.0, 200.0, 1.0);
        let mut g = Graphics::new();
        draw_grid(&mut g, &camera, &viewport, &config);

        assert!(g.commands().len() <= (1920.0 / MIN_BAR_LINE_SPACING_PX) as usize + 2);
        let xs = lines_with(&g, config.theme.bar_line);
        assert!(!xs.is_empty());
        assert!(xs.windows(2).all(|w| w[1] - w[0] >= MIN_BAR_LINE_SPACING_PX - 1.0));
    }

    #[test]
    fn test_bar_step() {
        assert_eq!(bar_step(120.0), 1);
        assert_eq!(bar_step(4.0), 1);
        assert_eq!(bar_step(3.0), 2);
        assert_eq!(bar_step(0.05), 128);
        assert_eq!(bar_step(0.0), 1 << 30);
    }

    #[test]
    fn test_zero_scale_draws_nothing() {
        let config = TimelineConfig::default();
        let camera = Camera::with_pixels_per_bar(0.0);
        let mut g = Graphics::new();
        draw_grid(&mut g, &camera, &Viewport::new(480.0, 200.0, 1.0), &config);
        assert!(g.is_empty());
    }
}
