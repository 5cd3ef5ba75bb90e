//! Project data as handed over by the surrounding application.
//!
//! The engine only ever reads these; it never mutates or persists them.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub u64);

/// Lane type of a track; picks the default clip color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneKind {
    #[default]
    Audio,
    Instrument,
    Automation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: ClipId,
    pub start_bar: f64,
    pub duration_bars: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub name: String,
}

impl Clip {
    #[inline]
    pub fn end_bar(&self) -> f64 {
        self.start_bar + self.duration_bars
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    #[serde(default)]
    pub name: String,
    pub color: Rgba,
    #[serde(rename = "type", default)]
    pub kind: LaneKind,
    #[serde(default)]
    pub clips: Vec<Clip>,
}

/// Row index of a track id, if present.
pub fn track_index(tracks: &[Track], id: TrackId) -> Option<usize> {
    tracks.iter().position(|t| t.id == id)
}
