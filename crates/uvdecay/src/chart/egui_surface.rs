//! Chart surface backed by an egui painter

use egui::epaint::TextShape;
use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Stroke};
use glam::Vec2;

use super::mapping::SurfaceDims;
use super::surface::{ChartSurface, Rgba, TextOrientation};

/// Paints into the rect allocated for the chart; surface coordinates are
/// relative to the rect's top-left corner
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn pos(&self, p: Vec2) -> Pos2 {
        self.rect.min + egui::vec2(p.x, p.y)
    }

    /// Convert a screen position into surface coordinates
    pub fn to_local(rect: Rect, screen: Pos2) -> Vec2 {
        let local = screen - rect.min;
        Vec2::new(local.x, local.y)
    }
}

fn color(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

impl ChartSurface for EguiSurface<'_> {
    fn dims(&self) -> SurfaceDims {
        SurfaceDims::new(self.rect.width(), self.rect.height())
    }

    fn clear(&mut self, c: Rgba) {
        self.painter.rect_filled(self.rect, CornerRadius::ZERO, color(c));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, c: Rgba) {
        self.painter.line_segment([self.pos(from), self.pos(to)], Stroke::new(width, color(c)));
    }

    fn polyline(&mut self, points: &[Vec2], width: f32, c: Rgba) {
        if points.len() < 2 {
            return;
        }
        let points = points.iter().map(|p| self.pos(*p)).collect();
        self.painter.add(egui::Shape::line(points, Stroke::new(width, color(c))));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, c: Rgba) {
        self.painter.circle_filled(self.pos(center), radius, color(c));
    }

    fn text(
        &mut self,
        pos: Vec2,
        text: &str,
        font_size: f32,
        c: Rgba,
        orientation: TextOrientation,
    ) {
        let font = FontId::proportional(font_size);
        match orientation {
            TextOrientation::Horizontal => {
                self.painter
                    .text(self.pos(pos), Align2::LEFT_BOTTOM, text, font, color(c));
            }
            TextOrientation::Vertical => {
                let galley = self
                    .painter
                    .layout_no_wrap(text.to_string(), font, color(c));
                // Rotating around the galley's top-left puts the glyphs right of the
                // anchor; shift left so the baseline sits on `pos`
                let anchor = self.pos(pos) - egui::vec2(galley.size().y, 0.0);
                let shape = TextShape::new(anchor, galley, color(c))
                    .with_angle(-std::f32::consts::FRAC_PI_2);
                self.painter.add(shape);
            }
        }
    }
}
