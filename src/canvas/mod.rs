pub mod painter;
pub mod surface;

pub use surface::WebSurface;
