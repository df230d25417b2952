//! Side panel with plastic selector, UV slider and reset button

use egui::{Color32, CornerRadius, Stroke, StrokeKind, Vec2};
use uvdecay_sim::PlasticKind;

/// Values edited by the controls panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlsState {
    /// Selected plastic
    pub material: PlasticKind,
    /// UV intensity in percent (0-100)
    pub uv_intensity: u8,
}

impl Default for ControlsState {
    fn default() -> Self {
        Self {
            material: PlasticKind::default(),
            uv_intensity: 70,
        }
    }
}

/// What the user asked for this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlsResponse {
    pub material_changed: bool,
    pub uv_changed: bool,
    pub reset_clicked: bool,
}

impl ControlsResponse {
    /// Selecting another plastic restarts the run, like pressing reset
    pub fn wants_reset(&self) -> bool {
        self.material_changed || self.reset_clicked
    }
}

/// Show the controls panel
pub fn show_controls(ctx: &egui::Context, state: &mut ControlsState) -> ControlsResponse {
    let mut response = ControlsResponse::default();

    egui::SidePanel::left("controls")
        .default_width(220.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("UV Decay");
            ui.label("Plastic mass under simulated UV exposure");
            ui.separator();

            // Plastic selector with legend swatch
            let previous = state.material;
            ui.horizontal(|ui| {
                show_swatch(ui, state.material.profile().color);
                egui::ComboBox::from_id_salt("plastic")
                    .selected_text(state.material.to_string())
                    .show_ui(ui, |ui| {
                        for kind in PlasticKind::ALL {
                            ui.selectable_value(&mut state.material, kind, kind.to_string());
                        }
                    });
            });
            response.material_changed = state.material != previous;

            ui.add_space(8.0);

            // UV intensity
            ui.label("UV intensity:");
            let slider = ui.add(
                egui::Slider::new(&mut state.uv_intensity, 0..=100)
                    .suffix("%")
                    .clamping(egui::SliderClamping::Always),
            );
            response.uv_changed = slider.changed();

            ui.add_space(8.0);

            if ui.button("Reset").clicked() {
                response.reset_clicked = true;
            }

            ui.separator();
            let profile = state.material.profile();
            ui.label(format!("Decay constant k = {}", profile.decay_constant));
            ui.label(format!("Initial mass: {:.1} g", profile.initial_mass));
        });

    response
}

/// Small square in the material color
fn show_swatch(ui: &mut egui::Ui, color: [u8; 4]) {
    let (response, painter) = ui.allocate_painter(Vec2::new(16.0, 16.0), egui::Sense::hover());
    painter.rect_filled(
        response.rect,
        CornerRadius::same(3),
        Color32::from_rgba_unmultiplied(color[0], color[1], color[2], color[3]),
    );
    painter.rect_stroke(
        response.rect,
        CornerRadius::same(3),
        Stroke::new(1.0, Color32::from_gray(60)),
        StrokeKind::Outside,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ControlsState::default();
        assert_eq!(state.material, PlasticKind::Pet);
        assert_eq!(state.uv_intensity, 70);
    }

    #[test]
    fn test_reset_triggers() {
        assert!(!ControlsResponse::default().wants_reset());
        assert!(ControlsResponse {
            material_changed: true,
            ..Default::default()
        }
        .wants_reset());
        assert!(!ControlsResponse {
            uv_changed: true,
            ..Default::default()
        }
        .wants_reset());
    }
}
