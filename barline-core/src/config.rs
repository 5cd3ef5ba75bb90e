//! Timeline configuration: base scales, gesture sensitivity, clip styling and
//! theme colors. Loaded from YAML; every field has a default so partial
//! documents are fine.

use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_PIXELS_PER_BAR, DEFAULT_TRACK_HEIGHT};
use crate::color::Rgba;
use crate::model::LaneKind;

/// Smallest accepted base scales, in CSS pixels.
pub const MIN_PIXELS_PER_BAR: f64 = 1.0;
pub const MIN_TRACK_HEIGHT: f64 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse timeline config: {0}")]
    Parse(#[from] yaml_serde::Error),
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall { field: &'static str, min: f64, value: f64 },
    #[error("beats_per_bar must be at least 1")]
    NoBeats,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Horizontal scale before zoom.
    pub pixels_per_bar: f64,
    /// Lane height before vertical zoom.
    pub track_height: f64,
    /// Time signature numerator; number of beat lines per bar.
    pub beats_per_bar: u32,
    /// Beat lines are only drawn when a beat is wider than this.
    pub beat_line_min_px: f64,
    /// Zoom delta per wheel pixel.
    pub wheel_zoom_sensitivity: f64,
    pub clip: ClipStyle,
    pub theme: Theme,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            pixels_per_bar: DEFAULT_PIXELS_PER_BAR,
            track_height: DEFAULT_TRACK_HEIGHT,
            beats_per_bar: 4,
            beat_line_min_px: 16.0,
            wheel_zoom_sensitivity: 0.002,
            clip: ClipStyle::default(),
            theme: Theme::default(),
        }
    }
}

impl TimelineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = yaml_serde::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("pixels_per_bar", self.pixels_per_bar)?;
        positive("track_height", self.track_height)?;
        positive("wheel_zoom_sensitivity", self.wheel_zoom_sensitivity)?;
        at_least("pixels_per_bar", self.pixels_per_bar, MIN_PIXELS_PER_BAR)?;
        at_least("track_height", self.track_height, MIN_TRACK_HEIGHT)?;
        if self.beats_per_bar == 0 {
            return Err(ConfigError::NoBeats);
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn at_least(field: &'static str, value: f64, min: f64) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::TooSmall { field, min, value })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipStyle {
    pub corner_radius: f64,
    /// Gap between the clip body and its lane edges.
    pub lane_padding: f64,
    pub label_padding: f64,
    pub label_font_px: f64,
    pub opacity: f32,
    pub selected_track_opacity: f32,
    /// Multiplier applied on top of the opacity for muted clips.
    pub muted_opacity: f32,
    pub selected_outline: Rgba,
    pub label_color: Rgba,
}

impl Default for ClipStyle {
    fn default() -> Self {
        Self {
            corner_radius: 4.0,
            lane_padding: 3.0,
            label_padding: 6.0,
            label_font_px: 11.0,
            opacity: 0.75,
            selected_track_opacity: 1.0,
            muted_opacity: 0.4,
            selected_outline: Rgba::rgb(255, 255, 255),
            label_color: Rgba::rgba(255, 255, 255, 0.9),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub bar_line: Rgba,
    pub beat_line: Rgba,
    pub alternate_band: Rgba,
    pub selected_band: Rgba,
    pub playhead: Rgba,
    pub audio_clip: Rgba,
    pub instrument_clip: Rgba,
    pub automation_clip: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bar_line: Rgba::rgba(255, 255, 255, 0.18),
            beat_line: Rgba::rgba(255, 255, 255, 0.06),
            alternate_band: Rgba::rgba(255, 255, 255, 0.03),
            selected_band: Rgba::rgba(80, 160, 255, 0.12),
            playhead: Rgba::rgb(255, 80, 80),
            audio_clip: Rgba::rgb(58, 134, 200),
            instrument_clip: Rgba::rgb(120, 190, 90),
            automation_clip: Rgba::rgb(200, 150, 60),
        }
    }
}

impl Theme {
    pub fn lane_color(&self, kind: LaneKind) -> Rgba {
        match kind {
            LaneKind::Audio => self.audio_clip,
            LaneKind::Instrument => self.instrument_clip,
            LaneKind::Automation => self.automation_clip,
        }
    }
}
