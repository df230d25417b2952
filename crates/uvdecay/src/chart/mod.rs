//! Decay chart: coordinate mapping, painting and pointer hit-testing

mod egui_surface;
mod mapping;
mod pixel_surface;
mod renderer;
mod surface;

pub use egui_surface::EguiSurface;
pub use hit_test::HitTester;
pub use mapping::{
    mass_to_y, time_to_x, to_pixel, ChartLayout, PlotBounds, SurfaceDims, AXIS_BOTTOM,
    AXIS_LEFT, AXIS_RIGHT, AXIS_TOP,
};
pub use pixel_surface::PixelSurface;
pub use renderer::{tick_values, ChartRenderer, TICK_INTERVALS};
pub use surface::{ChartSurface, Rgba, TextOrientation};
