pub mod app;
pub mod timeline_canvas;
pub mod toolbar;
