//! Project data for the demo page: a small hand-written arrangement plus a
//! generated one large enough to exercise culling and the clip pool.

use barline_core::{Clip, ClipId, LaneKind, Rgba, Track, TrackId};
use serde::Deserialize;

const DEMO_PROJECT_JSON: &str = include_str!("../assets/demo_project.json");

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoProject {
    pub tempo_bpm: f64,
    pub tracks: Vec<Track>,
}

impl Default for DemoProject {
    fn default() -> Self {
        Self { tempo_bpm: 120.0, tracks: Vec::new() }
    }
}

pub fn load_demo_project() -> DemoProject {
    match serde_json::from_str::<DemoProject>(DEMO_PROJECT_JSON) {
        Ok(project) => project,
        Err(e) => {
            log::error!("demo project is malformed: {e}");
            DemoProject::default()
        }
    }
}

const STRESS_COLORS: [Rgba; 6] = [
    Rgba::rgb(224, 96, 58),
    Rgba::rgb(58, 134, 200),
    Rgba::rgb(120, 190, 90),
    Rgba::rgb(200, 106, 160),
    Rgba::rgb(200, 150, 60),
    Rgba::rgb(138, 138, 138),
];

/// Deterministic arrangement with `track_count` lanes over `bar_count` bars.
/// Clip lengths cycle through 1/4 to 8 bars so both tiny and long clips show up.
pub fn stress_project(track_count: u64, bar_count: u32) -> Vec<Track> {
    const LENGTHS: [f64; 7] = [0.25, 0.5, 1.0, 2.0, 4.0, 1.5, 8.0];
    (0..track_count)
        .map(|t| {
            let kind = match t % 3 {
                0 => LaneKind::Audio,
                1 => LaneKind::Instrument,
                _ => LaneKind::Automation,
            };
            let mut clips = Vec::new();
            let mut bar = (t % 4) as f64 * 0.5;
            let mut n = 0u64;
            while bar < bar_count as f64 {
                let len = LENGTHS[((t + n) % LENGTHS.len() as u64) as usize];
                clips.push(Clip {
                    id: ClipId(t * 1_000_000 + n),
                    start_bar: bar,
                    duration_bars: len,
                    color: None,
                    muted: (t + n) % 11 == 0,
                    name: format!("{}-{}", t + 1, n + 1),
                });
                // leave a gap every third clip
                bar += len + if n % 3 == 2 { 1.0 } else { 0.0 };
                n += 1;
            }
            Track {
                id: TrackId(t),
                name: format!("Lane {}", t + 1),
                color: STRESS_COLORS[(t % STRESS_COLORS.len() as u64) as usize],
                kind,
                clips,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_project_parses() {
        let project = serde_json::from_str::<DemoProject>(DEMO_PROJECT_JSON).unwrap();
        assert_eq!(project.tracks.len(), 6);
        assert_eq!(project.tracks[4].kind, LaneKind::Automation);
        assert!(project.tracks[0].clips.iter().any(|c| c.muted));
    }

    #[test]
    fn test_stress_project_is_large_and_ordered() {
        let tracks = stress_project(40, 2_000);
        assert_eq!(tracks.len(), 40);
        let total: usize = tracks.iter().map(|t| t.clips.len()).sum();
        assert!(total > 10_000, "only {total} clips");
        for track in &tracks {
            assert!(track.clips.windows(2).all(|w| w[0].end_bar() <= w[1].start_bar));
            assert!(track.clips.iter().all(|c| c.start_bar < 2_000.0));
        }
    }
}
