//! Central chart panel: runs the scheduled frame, paints, and routes pointer
//! events to the tooltip

use web_time::Instant;

use crate::chart::{ChartSurface, EguiSurface, HitTester, SurfaceDims};
use crate::driver::{AnimationDriver, TickHandle};
use crate::ui::TooltipState;

/// Pointer tracking and tooltip for the chart
pub struct ChartView {
    hit_tester: HitTester,
    tooltip: TooltipState,
    /// Last pointer position seen over the chart; `None` while outside
    last_pointer: Option<egui::Pos2>,
}

impl ChartView {
    pub fn new(hit_tester: HitTester, tooltip: TooltipState) -> Self {
        Self {
            hit_tester,
            tooltip,
            last_pointer: None,
        }
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Whether the chart needs another frame: a pending tick or a click
    /// tooltip still counting down
    pub fn wants_frame(&self, driver: &AnimationDriver) -> bool {
        driver.is_scheduled() || self.tooltip.has_deadline()
    }

    /// Paint the chart into the remaining space of `ui`.
    ///
    /// A reset takes precedence over the scheduled frame, which is then
    /// dropped; with neither the chart is just repainted at the current size.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        driver: &mut AnimationDriver,
        reset: bool,
        scheduled: Option<TickHandle>,
    ) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;

        let dims = {
            let mut surface = EguiSurface::new(&painter, rect);
            if reset {
                driver.reset(&mut surface);
            } else if let Some(handle) = scheduled {
                driver.tick(handle, &mut surface);
            } else {
                driver.redraw(&mut surface);
            }
            surface.dims()
        };

        let now = Instant::now();

        match response.hover_pos() {
            Some(pos) => {
                if self.last_pointer != Some(pos) {
                    self.last_pointer = Some(pos);
                    let hit = self.hit_at(pos, rect, driver, dims);
                    self.tooltip.on_pointer_move(hit, pos);
                }
            }
            None => {
                if self.last_pointer.take().is_some() {
                    self.tooltip.on_pointer_leave();
                }
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let hit = self.hit_at(pos, rect, driver, dims);
                self.tooltip.on_click(hit, pos, now);
            }
        }

        self.tooltip.update(now);
        self.tooltip.render(ui.ctx(), driver.material().color);
    }

    fn hit_at(
        &self,
        pos: egui::Pos2,
        rect: egui::Rect,
        driver: &AnimationDriver,
        dims: SurfaceDims,
    ) -> Option<uvdecay_sim::Sample> {
        let local = EguiSurface::to_local(rect, pos);
        self.hit_tester
            .find_nearest(local.x, local.y, driver.state(), driver.material(), dims)
    }
}
