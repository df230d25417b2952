//! UI module - controls, chart panel, tooltip and status overlay

mod chart_view;
mod controls;
mod hud;
mod tooltip;

pub use chart_view::ChartView;
pub use controls::{show_controls, ControlsResponse, ControlsState};
pub use hud::{show_hud, DecayStats};
pub use tooltip::{format_sample, TooltipState};
