//! Headless core of the barline timeline: coordinate transforms, the camera
//! store, gesture mapping, the retained scene with its clip pool, the draw
//! passes and the host lifecycle. No browser types appear here so all of it
//! runs and tests natively.

pub mod camera;
pub mod color;
pub mod config;
pub mod host;
pub mod input;
pub mod model;
pub mod render;
pub mod scene;
pub mod transform;

pub use camera::{Camera, CameraStore, Selection};
pub use color::Rgba;
pub use config::{ConfigError, TimelineConfig};
pub use host::{HostStats, Surface, TimelineHost};
pub use model::{Clip, ClipId, LaneKind, Track, TrackId};
pub use render::Viewport;
