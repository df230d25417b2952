//! Drawing surface abstraction for the chart

use glam::Vec2;

use super::mapping::SurfaceDims;

/// RGBA color, 8 bits per channel
pub type Rgba = [u8; 4];

/// Direction text runs in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextOrientation {
    #[default]
    Horizontal,
    /// Rotated a quarter turn counter-clockwise, reading bottom to top
    Vertical,
}

/// 2D target the chart can be painted onto
///
/// Positions are in surface units with the origin at the top-left corner.
/// Text positions name the left end of the baseline, as with a canvas
/// `fillText` call.
pub trait ChartSurface {
    /// Current size; queried before every draw so resizes take effect
    fn dims(&self) -> SurfaceDims;

    /// Fill the whole surface
    fn clear(&mut self, color: Rgba);

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Connected line through all points in order
    fn polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], width, color);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn text(
        &mut self,
        pos: Vec2,
        text: &str,
        font_size: f32,
        color: Rgba,
        orientation: TextOrientation,
    );
}
