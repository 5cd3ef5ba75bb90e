pub mod canvas;
pub mod components;
pub mod demo;
pub mod dom;
pub mod settings;
pub mod state;
pub mod transport;
