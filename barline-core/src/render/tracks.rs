use super::Viewport;
use crate::camera::CameraStore;
use crate::config::Theme;
use crate::model::{track_index, Track};
use crate::scene::{Graphics, Rect};
use crate::transform::{track_index_to_absolute_y, visible_track_range};

/// Odd rows get an alternating band and the selected track a highlight band;
/// unselected even rows stay transparent.
pub fn draw_track_backgrounds(
    g: &mut Graphics,
    store: &CameraStore,
    viewport: &Viewport,
    theme: &Theme,
    tracks: &[Track],
) {
    g.clear();
    if tracks.is_empty() || viewport.is_empty() {
        return;
    }

    let camera = store.camera();
    let track_height = store.effective_track_height();
    let range = visible_track_range(camera, viewport.height, track_height, tracks.len());
    let selected = store.selection().track.and_then(|id| track_index(tracks, id));

    for row in range.iter() {
        let y = track_index_to_absolute_y(row, track_height) - camera.scroll_y;
        let band = Rect::new(0.0, y, viewport.width, track_height);
        if row % 2 == 1 {
            g.fill_rect(band, theme.alternate_band);
        }
        if selected == Some(row) {
            g.fill_rect(band, theme.selected_band);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::model::{LaneKind, TrackId};
    use crate::scene::DrawCmd;

    fn tracks(n: u64) -> Vec<Track> {
        (0..n)
            .map(|i| Track {
                id: TrackId(i),
                name: format!("Track {i}"),
                color: Rgba::rgb(90, 90, 90),
                kind: LaneKind::Audio,
                clips: Vec::new(),
            })
            .collect()
    }

    fn bands(g: &Graphics, color: Rgba) -> Vec<f64> {
        g.commands()
            .iter()
            .filter_map(|cmd| match *cmd {
                DrawCmd::FillRect { rect, color: c } if c == color => Some(rect.y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_odd_rows_banded_even_rows_transparent() {
        let theme = Theme::default();
        let store = CameraStore::new(120.0, 80.0);
        let mut g = Graphics::new();
        draw_track_backgrounds(&mut g, &store, &Viewport::new(600.0, 320.0, 1.0), &theme, &tracks(10));
        // rows 0..=4 visible; rows 1 and 3 banded
        assert_eq!(bands(&g, theme.alternate_band), vec![80.0, 240.0]);
        assert!(bands(&g, theme.selected_band).is_empty());
    }

    #[test]
    fn test_selected_track_highlighted() {
        let theme = Theme::default();
        let mut store = CameraStore::new(120.0, 80.0);
        store.select_track(Some(TrackId(2)));
        store.set_scroll_y(40.0);
        let mut g = Graphics::new();
        draw_track_backgrounds(&mut g, &store, &Viewport::new(600.0, 320.0, 1.0), &theme, &tracks(10));
        assert_eq!(bands(&g, theme.selected_band), vec![120.0]);
    }

    #[test]
    fn test_selected_track_off_screen_not_drawn() {
        let theme = Theme::default();
        let mut store = CameraStore::new(120.0, 80.0);
        store.select_track(Some(TrackId(9)));
        let mut g = Graphics::new();
        draw_track_backgrounds(&mut g, &store, &Viewport::new(600.0, 160.0, 1.0), &theme, &tracks(10));
        assert!(bands(&g, theme.selected_band).is_empty());
    }

    #[test]
    fn test_vertical_zoom_scales_rows() {
        let theme = Theme::default();
        let mut store = CameraStore::new(120.0, 80.0);
        store.zoom_y(1.0);
        let mut g = Graphics::new();
        draw_track_backgrounds(&mut g, &store, &Viewport::new(600.0, 320.0, 1.0), &theme, &tracks(10));
        assert_eq!(bands(&g, theme.alternate_band), vec![160.0]);
    }

    #[test]
    fn test_no_tracks_draws_nothing() {
        let mut g = Graphics::new();
        draw_track_backgrounds(&mut g, &CameraStore::default(), &Viewport::new(600.0, 320.0, 1.0), &Theme::default(), &[]);
        assert!(g.is_empty());
    }
}
