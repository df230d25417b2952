//! Rendering module - wgpu surface the egui frame is drawn onto

mod renderer;

pub use renderer::Renderer;
