//! Floating label showing the chart sample under the pointer

use std::time::Duration;

use uvdecay_sim::Sample;
use web_time::Instant;

/// Tooltip offset from the pointer
const POINTER_OFFSET: egui::Vec2 = egui::vec2(16.0, -8.0);

/// Tooltip state driven by pointer events over the chart
pub struct TooltipState {
    sample: Option<Sample>,
    /// Screen position of the pointer that produced the current sample
    anchor: egui::Pos2,
    /// Auto-hide deadline set by the most recent click
    hide_at: Option<Instant>,
    click_duration: Duration,
}

impl TooltipState {
    pub const DEFAULT_CLICK_DURATION: Duration = Duration::from_millis(1800);

    pub fn new(click_duration: Duration) -> Self {
        Self {
            sample: None,
            anchor: egui::Pos2::ZERO,
            hide_at: None,
            click_duration,
        }
    }

    /// Pointer moved over the chart: show the matched sample or hide
    pub fn on_pointer_move(&mut self, hit: Option<Sample>, pointer: egui::Pos2) {
        match hit {
            Some(sample) => self.show(sample, pointer),
            None => self.hide(),
        }
    }

    /// Pointer left the chart
    pub fn on_pointer_leave(&mut self) {
        self.hide();
    }

    /// Click on the chart: show the matched sample and hide it after the click
    /// duration no matter what the pointer does next. A miss changes nothing.
    pub fn on_click(&mut self, hit: Option<Sample>, pointer: egui::Pos2, now: Instant) {
        if let Some(sample) = hit {
            self.show(sample, pointer);
            self.hide_at = Some(now + self.click_duration);
        }
    }

    /// Apply an expired click deadline
    pub fn update(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|deadline| now >= deadline) {
            self.hide();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.sample.is_some()
    }

    pub fn sample(&self) -> Option<&Sample> {
        self.sample.as_ref()
    }

    /// Whether a click deadline still needs frames to expire
    pub fn has_deadline(&self) -> bool {
        self.hide_at.is_some()
    }

    /// Screen position of the tooltip's top-left corner
    pub fn position(&self) -> egui::Pos2 {
        self.anchor + POINTER_OFFSET
    }

    fn show(&mut self, sample: Sample, pointer: egui::Pos2) {
        self.sample = Some(sample);
        self.anchor = pointer;
    }

    fn hide(&mut self) {
        self.sample = None;
        self.hide_at = None;
    }

    /// Render the tooltip card; `accent` is the material color
    pub fn render(&self, ctx: &egui::Context, accent: [u8; 4]) {
        let Some(sample) = self.sample else {
            return;
        };
        let (time_line, mass_line) = format_sample(&sample);
        let border = egui::Color32::from_rgb(accent[0], accent[1], accent[2]);

        egui::Area::new(egui::Id::new("chart_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(self.position())
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 242))
                    .stroke(egui::Stroke::new(1.0, border))
                    .inner_margin(egui::Margin::symmetric(12, 6))
                    .corner_radius(6.0)
                    .show(ui, |ui| {
                        let text_color = egui::Color32::from_rgb(0x22, 0x22, 0x22);
                        ui.label(egui::RichText::new(time_line).color(text_color).size(14.0));
                        ui.label(egui::RichText::new(mass_line).color(text_color).size(14.0));
                    });
            });
    }
}

impl Default for TooltipState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CLICK_DURATION)
    }
}

/// Tooltip lines: time with 2 decimals, mass with 3
pub fn format_sample(sample: &Sample) -> (String, String) {
    (
        format!("Time: {:.2} min", sample.time),
        format!("Mass: {:.3} g", sample.mass),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Sample = Sample::new(12.3456, 6.70321);
    const POINTER: egui::Pos2 = egui::pos2(100.0, 50.0);

    #[test]
    fn test_format_precision() {
        let (time, mass) = format_sample(&SAMPLE);
        assert_eq!(time, "Time: 12.35 min");
        assert_eq!(mass, "Mass: 6.703 g");
    }

    #[test]
    fn test_hover_shows_and_hides() {
        let mut tooltip = TooltipState::default();
        tooltip.on_pointer_move(Some(SAMPLE), POINTER);
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.position(), egui::pos2(116.0, 42.0));

        tooltip.on_pointer_move(None, POINTER);
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_leave_hides() {
        let mut tooltip = TooltipState::default();
        tooltip.on_pointer_move(Some(SAMPLE), POINTER);
        tooltip.on_pointer_leave();
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_click_auto_hides_after_delay() {
        let mut tooltip = TooltipState::default();
        let now = Instant::now();
        tooltip.on_click(Some(SAMPLE), POINTER, now);
        assert!(tooltip.is_visible());

        tooltip.update(now + Duration::from_millis(1799));
        assert!(tooltip.is_visible());

        tooltip.update(now + Duration::from_millis(1800));
        assert!(!tooltip.is_visible());
        assert!(!tooltip.has_deadline());
    }

    #[test]
    fn test_click_deadline_survives_movement() {
        let mut tooltip = TooltipState::default();
        let now = Instant::now();
        tooltip.on_click(Some(SAMPLE), POINTER, now);

        let other = Sample::new(1.0, 9.0);
        tooltip.on_pointer_move(Some(other), egui::pos2(120.0, 60.0));
        assert_eq!(tooltip.sample(), Some(&other));

        tooltip.update(now + Duration::from_secs(2));
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_later_click_replaces_deadline() {
        let mut tooltip = TooltipState::default();
        let first = Instant::now();
        tooltip.on_click(Some(SAMPLE), POINTER, first);

        let second = first + Duration::from_millis(1000);
        tooltip.on_click(Some(SAMPLE), POINTER, second);

        tooltip.update(first + Duration::from_millis(1900));
        assert!(tooltip.is_visible());
        tooltip.update(second + Duration::from_millis(1800));
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_click_miss_changes_nothing() {
        let mut tooltip = TooltipState::default();
        tooltip.on_click(None, POINTER, Instant::now());
        assert!(!tooltip.is_visible());
        assert!(!tooltip.has_deadline());
    }
}
