//! Sample-to-pixel mapping shared by the chart renderer and hit-testing
//!
//! Surface coordinates have their origin at the top-left corner with y
//! growing downward.

use glam::Vec2;
use uvdecay_sim::{MaterialProfile, Sample, SimulationState};

/// Left margin: x of the vertical axis
pub const AXIS_LEFT: f32 = 40.0;
/// Bottom margin: distance of the horizontal axis from the bottom edge
pub const AXIS_BOTTOM: f32 = 30.0;
/// Top margin: where the vertical axis starts
pub const AXIS_TOP: f32 = 10.0;
/// Right margin: where the horizontal axis ends
pub const AXIS_RIGHT: f32 = 10.0;

/// Horizontal space not covered by the curve (leaves headroom right of the last sample)
const PLOT_WIDTH_INSET: f32 = 60.0;
/// Vertical space not covered by the curve (leaves headroom above the initial mass)
const PLOT_HEIGHT_INSET: f32 = 60.0;

/// Size of a drawing surface in surface units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDims {
    pub width: f32,
    pub height: f32,
}

impl SurfaceDims {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width available to the curve
    pub fn plot_width(&self) -> f32 {
        (self.width - PLOT_WIDTH_INSET).max(0.0)
    }

    /// Height available to the curve
    pub fn plot_height(&self) -> f32 {
        (self.height - PLOT_HEIGHT_INSET).max(0.0)
    }

    /// y of the horizontal axis
    pub fn baseline(&self) -> f32 {
        self.height - AXIS_BOTTOM
    }
}

/// Data ranges covered by the chart
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotBounds {
    pub max_time: f64,
    pub max_mass: f64,
}

impl PlotBounds {
    /// The time axis never spans less than this many minutes
    pub const MIN_TIME_SPAN: f64 = 10.0;

    /// Bounds for the current history: time grows with the run, mass is fixed to the
    /// material's initial mass
    pub fn for_state(state: &SimulationState, material: &MaterialProfile) -> Self {
        Self {
            max_time: state.max_time().max(Self::MIN_TIME_SPAN),
            max_mass: material.initial_mass,
        }
    }
}

/// Map a sample onto the surface
pub fn to_pixel(sample: &Sample, bounds: &PlotBounds, dims: SurfaceDims) -> Vec2 {
    Vec2::new(
        time_to_x(sample.time, bounds, dims),
        mass_to_y(sample.mass, bounds, dims),
    )
}

pub fn time_to_x(time: f64, bounds: &PlotBounds, dims: SurfaceDims) -> f32 {
    AXIS_LEFT + dims.plot_width() * (time / bounds.max_time) as f32
}

pub fn mass_to_y(mass: f64, bounds: &PlotBounds, dims: SurfaceDims) -> f32 {
    dims.baseline() - dims.plot_height() * (mass / bounds.max_mass) as f32
}

/// Mapping captured for one draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub bounds: PlotBounds,
    pub dims: SurfaceDims,
}

impl ChartLayout {
    pub fn new(state: &SimulationState, material: &MaterialProfile, dims: SurfaceDims) -> Self {
        Self {
            bounds: PlotBounds::for_state(state, material),
            dims,
        }
    }

    pub fn to_pixel(&self, sample: &Sample) -> Vec2 {
        to_pixel(sample, &self.bounds, self.dims)
    }
}
