//! Status overlay for the running simulation

use egui::{Align2, Color32, RichText};

use crate::driver::DriverPhase;

/// Card behind the status lines; light like the tooltip card
const HUD_FILL: Color32 = Color32::from_rgb(0xf5, 0xf5, 0xf5);
const HUD_TEXT: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
const RUNNING_COLOR: Color32 = Color32::from_rgb(0x14, 0x6c, 0x2e);
const STOPPED_COLOR: Color32 = Color32::from_rgb(0xa0, 0x52, 0x00);

/// Values shown in the status overlay
pub struct DecayStats {
    pub elapsed_time: f64,
    pub current_mass: f64,
    pub uv_intensity: u8,
    pub phase: DriverPhase,
}

impl DecayStats {
    /// Status lines with their text colors
    pub fn lines(&self) -> [(String, Color32); 4] {
        let phase = match self.phase {
            DriverPhase::Running => ("RUNNING".to_string(), RUNNING_COLOR),
            DriverPhase::Stopped => ("STOPPED".to_string(), STOPPED_COLOR),
        };
        [
            (format!("Time: {:.1} min", self.elapsed_time), HUD_TEXT),
            (format!("Mass: {:.3} g", self.current_mass), HUD_TEXT),
            (format!("UV: {}%", self.uv_intensity), HUD_TEXT),
            phase,
        ]
    }
}

/// Show the status overlay in the chart's top-right corner
pub fn show_hud(ctx: &egui::Context, stats: &DecayStats) {
    egui::Area::new(egui::Id::new("decay_hud"))
        .anchor(Align2::RIGHT_TOP, [-10.0, 10.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(HUD_FILL)
                .stroke(egui::Stroke::new(1.0, Color32::from_gray(200)))
                .inner_margin(8.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    for (text, color) in stats.lines() {
                        ui.label(RichText::new(text).color(color));
                    }
                });
        });
}
