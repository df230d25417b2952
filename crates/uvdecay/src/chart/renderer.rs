//! Mass-over-time chart renderer
//!
//! Paints axes, axis titles, the decay curve, a marker at the latest sample and
//! tick labels onto any [`ChartSurface`].

use glam::Vec2;
use uvdecay_sim::{MaterialProfile, SimulationState};

use super::mapping::{mass_to_y, time_to_x, ChartLayout, AXIS_LEFT, AXIS_RIGHT, AXIS_TOP};
use super::surface::{ChartSurface, Rgba, TextOrientation};

/// Number of intervals on each axis (labels = intervals + 1)
pub const TICK_INTERVALS: usize = 5;

/// Colors and sizes used when painting the chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    pub background: Rgba,
    pub axis_color: Rgba,
    pub axis_width: f32,
    pub title_color: Rgba,
    pub title_size: f32,
    pub tick_color: Rgba,
    pub tick_size: f32,
    pub curve_width: f32,
    pub marker_radius: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: [0xff, 0xff, 0xff, 0xff],
            axis_color: [0x88, 0x88, 0x88, 0xff],
            axis_width: 1.0,
            title_color: [0x33, 0x33, 0x33, 0xff],
            title_size: 14.0,
            tick_color: [0x55, 0x55, 0x55, 0xff],
            tick_size: 12.0,
            curve_width: 3.0,
            marker_radius: 6.0,
        }
    }
}

/// Draws the decay chart for a simulation state
#[derive(Clone, Debug, Default)]
pub struct ChartRenderer {
    style: ChartStyle,
}

impl ChartRenderer {
    /// Clear and repaint `surface`, returning the mapping that was used
    pub fn draw<S: ChartSurface + ?Sized>(
        &self,
        surface: &mut S,
        state: &SimulationState,
        material: &MaterialProfile,
    ) -> ChartLayout {
        let layout = ChartLayout::new(state, material, surface.dims());

        surface.clear(self.style.background);
        self.draw_axes(surface, &layout);
        self.draw_titles(surface, &layout);
        self.draw_curve(surface, &layout, state, material);
        self.draw_ticks(surface, &layout);

        layout
    }

    fn draw_axes<S: ChartSurface + ?Sized>(&self, surface: &mut S, layout: &ChartLayout) {
        let dims = layout.dims;
        let corner = Vec2::new(AXIS_LEFT, dims.baseline());
        let style = &self.style;

        surface.line(
            Vec2::new(AXIS_LEFT, AXIS_TOP),
            corner,
            style.axis_width,
            style.axis_color,
        );
        surface.line(
            corner,
            Vec2::new(dims.width - AXIS_RIGHT, dims.baseline()),
            style.axis_width,
            style.axis_color,
        );
    }

    fn draw_titles<S: ChartSurface + ?Sized>(&self, surface: &mut S, layout: &ChartLayout) {
        let dims = layout.dims;
        let style = &self.style;

        surface.text(
            Vec2::new(dims.width / 2.0 - 30.0, dims.height - 8.0),
            "Time (min)",
            style.title_size,
            style.title_color,
            TextOrientation::Horizontal,
        );
        surface.text(
            Vec2::new(12.0, dims.height / 2.0 + 30.0),
            "Mass (g)",
            style.title_size,
            style.title_color,
            TextOrientation::Vertical,
        );
    }

    fn draw_curve<S: ChartSurface + ?Sized>(
        &self,
        surface: &mut S,
        layout: &ChartLayout,
        state: &SimulationState,
        material: &MaterialProfile,
    ) {
        let points: Vec<Vec2> = state
            .history()
            .iter()
            .map(|sample| layout.to_pixel(sample))
            .collect();

        surface.polyline(&points, self.style.curve_width, material.color);

        if let Some(latest) = points.last() {
            surface.fill_circle(*latest, self.style.marker_radius, material.color);
        }
    }

    fn draw_ticks<S: ChartSurface + ?Sized>(&self, surface: &mut S, layout: &ChartLayout) {
        let dims = layout.dims;
        let bounds = &layout.bounds;
        let style = &self.style;

        // Mass labels, top to bottom
        for mass in tick_values(bounds.max_mass).into_iter().rev() {
            let y = mass_to_y(mass, bounds, dims);
            surface.text(
                Vec2::new(8.0, y + 4.0),
                &format!("{:.1}", mass),
                style.tick_size,
                style.tick_color,
                TextOrientation::Horizontal,
            );
        }

        // Time labels, left to right
        for time in tick_values(bounds.max_time) {
            let x = time_to_x(time, bounds, dims);
            surface.text(
                Vec2::new(x - 10.0, dims.height - 12.0),
                &format!("{:.1}", time),
                style.tick_size,
                style.tick_color,
                TextOrientation::Horizontal,
            );
        }
    }
}

/// Tick label values for an axis spanning `0..=max`
pub fn tick_values(max: f64) -> [f64; TICK_INTERVALS + 1] {
    std::array::from_fn(|i| max * i as f64 / TICK_INTERVALS as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::mapping::SurfaceDims;
    use crate::chart::testing::{DrawCall, RecordingSurface};
    use uvdecay_sim::PlasticKind;

    fn draw_fresh(dims: SurfaceDims) -> (RecordingSurface, ChartLayout) {
        let pet = PlasticKind::Pet.profile();
        let state = SimulationState::new(&pet);
        let mut surface = RecordingSurface::new(dims);
        let layout = ChartRenderer::default().draw(&mut surface, &state, &pet);
        (surface, layout)
    }

    #[test]
    fn test_draw_starts_with_clear() {
        let (surface, _) = draw_fresh(SurfaceDims::new(400.0, 300.0));
        assert!(matches!(surface.calls.first(), Some(DrawCall::Clear(_))));
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Clear(_))), 1);
    }

    #[test]
    fn test_axes_use_fixed_margins() {
        let (surface, _) = draw_fresh(SurfaceDims::new(400.0, 300.0));
        let lines: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();

        assert!(lines.contains(&(Vec2::new(40.0, 10.0), Vec2::new(40.0, 270.0))));
        assert!(lines.contains(&(Vec2::new(40.0, 270.0), Vec2::new(390.0, 270.0))));
    }

    #[test]
    fn test_six_tick_labels_per_axis() {
        let (surface, _) = draw_fresh(SurfaceDims::new(400.0, 300.0));
        let labels = surface.texts();

        for expected in ["10.0", "8.0", "6.0", "4.0", "2.0", "0.0"] {
            assert!(labels.iter().any(|l| l == expected), "missing mass label {expected}");
        }
        // 0.0 appears on both axes, plus 2.0..10.0 on the time axis
        assert_eq!(labels.iter().filter(|l| *l == "0.0").count(), 2);
        assert_eq!(labels.iter().filter(|l| *l == "10.0").count(), 2);
        // 12 tick labels + 2 axis titles
        assert_eq!(labels.len(), 2 * (TICK_INTERVALS + 1) + 2);
    }

    #[test]
    fn test_marker_at_latest_sample() {
        let pet = PlasticKind::Pet.profile();
        let mut state = SimulationState::new(&pet);
        for _ in 0..40 {
            state.advance(&pet, 100);
        }

        let mut surface = RecordingSurface::new(SurfaceDims::new(500.0, 300.0));
        let layout = ChartRenderer::default().draw(&mut surface, &state, &pet);
        let expected = layout.to_pixel(state.latest().unwrap());

        let markers: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Circle { center, color, .. } => Some((*center, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec![(expected, pet.color)]);
    }

    #[test]
    fn test_curve_has_one_point_per_sample() {
        let pp = PlasticKind::Pp.profile();
        let mut state = SimulationState::new(&pp);
        for _ in 0..12 {
            state.advance(&pp, 70);
        }

        let mut surface = RecordingSurface::new(SurfaceDims::new(500.0, 300.0));
        ChartRenderer::default().draw(&mut surface, &state, &pp);

        let curve = surface
            .calls
            .iter()
            .find_map(|c| match c {
                DrawCall::Polyline { points, .. } => Some(points.clone()),
                _ => None,
            })
            .expect("curve drawn");
        assert_eq!(curve.len(), state.history().len());
        assert!(curve.windows(2).all(|w| w[1].x >= w[0].x));
    }

    #[test]
    fn test_layout_follows_surface_size() {
        let (_, small) = draw_fresh(SurfaceDims::new(200.0, 150.0));
        let (_, large) = draw_fresh(SurfaceDims::new(800.0, 600.0));
        assert_eq!(small.dims, SurfaceDims::new(200.0, 150.0));
        assert_eq!(large.dims, SurfaceDims::new(800.0, 600.0));
    }

    #[test]
    fn test_tick_values() {
        assert_eq!(tick_values(10.0), [0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }
}
