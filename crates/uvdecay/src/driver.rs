//! Frame-driven animation loop
//!
//! The driver owns the simulation state and advances it once per display
//! frame. Each scheduled frame is represented by a [`TickHandle`]; a reset
//! revokes every handle issued before it, so a stale frame can never advance
//! the new run.

use uvdecay_sim::{MaterialProfile, PlasticKind, SimParams, SimulationState};

use crate::chart::{ChartLayout, ChartRenderer, ChartSurface};

/// Loop state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverPhase {
    /// Ticks are advancing the simulation
    Running,
    /// Terminal until the next reset
    Stopped,
}

/// Revocable token for one scheduled frame
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a scheduled tick does nothing until passed to AnimationDriver::tick"]
pub struct TickHandle {
    generation: u64,
}

/// Result of running a scheduled frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The frame ran; `rescheduled` tells whether another frame is pending
    Ran { rescheduled: bool },
    /// The handle was revoked by a reset; nothing happened
    Revoked,
}

/// Drives the simulation at display refresh rate and repaints the chart
pub struct AnimationDriver {
    state: SimulationState,
    material: MaterialProfile,
    uv_intensity: u8,
    renderer: ChartRenderer,
    phase: DriverPhase,
    generation: u64,
    pending: Option<TickHandle>,
}

impl AnimationDriver {
    /// Create an idle driver; nothing runs until [`AnimationDriver::reset`]
    pub fn new(kind: PlasticKind, uv_intensity: u8, params: SimParams) -> Self {
        let material = kind.profile();
        Self {
            state: SimulationState::with_params(&material, params),
            material,
            uv_intensity: uv_intensity.min(100),
            renderer: ChartRenderer::default(),
            phase: DriverPhase::Stopped,
            generation: 0,
            pending: None,
        }
    }

    /// Revoke any pending frame, restart the run, draw once and schedule the loop
    pub fn reset<S: ChartSurface + ?Sized>(&mut self, surface: &mut S) -> ChartLayout {
        self.cancel_pending();
        self.state.reset(&self.material);
        self.phase = DriverPhase::Running;
        log::info!(
            "Reset: {} at {}% UV",
            self.material.name,
            self.uv_intensity
        );

        let layout = self.redraw(surface);
        self.pending = Some(self.schedule());
        layout
    }

    /// Run one scheduled frame: advance while running, always redraw, and
    /// reschedule only if still running afterwards
    pub fn tick<S: ChartSurface + ?Sized>(
        &mut self,
        handle: TickHandle,
        surface: &mut S,
    ) -> TickOutcome {
        if handle.generation != self.generation {
            log::debug!("Ignoring revoked tick (generation {})", handle.generation);
            return TickOutcome::Revoked;
        }
        // The handle being run is the one that was pending
        self.pending = None;

        if self.phase == DriverPhase::Running {
            self.state.advance(&self.material, self.uv_intensity);
            if !self.state.is_running() {
                self.phase = DriverPhase::Stopped;
                log::info!(
                    "{} fully decayed at t = {:.1} min",
                    self.material.name,
                    self.state.elapsed_time()
                );
            }
        }

        self.redraw(surface);

        let rescheduled = self.phase == DriverPhase::Running;
        if rescheduled {
            self.pending = Some(self.schedule());
        }
        TickOutcome::Ran { rescheduled }
    }

    /// Repaint without advancing (resize, hover, idle frames)
    pub fn redraw<S: ChartSurface + ?Sized>(&self, surface: &mut S) -> ChartLayout {
        self.renderer.draw(surface, &self.state, &self.material)
    }

    /// Take the pending frame, if any, to hand back to [`AnimationDriver::tick`]
    pub fn take_scheduled(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }

    /// Whether another frame has been requested
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Switch plastics; takes effect on the next reset
    pub fn set_material(&mut self, kind: PlasticKind) {
        self.material = kind.profile();
    }

    /// Change UV intensity (percent, clamped to 100); applies from the next tick
    pub fn set_uv_intensity(&mut self, uv_intensity: u8) {
        self.uv_intensity = uv_intensity.min(100);
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn material(&self) -> &MaterialProfile {
        &self.material
    }

    pub fn uv_intensity(&self) -> u8 {
        self.uv_intensity
    }

    fn schedule(&self) -> TickHandle {
        TickHandle {
            generation: self.generation,
        }
    }

    fn cancel_pending(&mut self) {
        self.pending = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::testing::RecordingSurface;
    use crate::chart::SurfaceDims;

    fn surface() -> RecordingSurface {
        RecordingSurface::new(SurfaceDims::new(480.0, 320.0))
    }

    fn driver(uv: u8) -> AnimationDriver {
        AnimationDriver::new(PlasticKind::Pet, uv, SimParams::default())
    }

    #[test]
    fn test_idle_until_reset() {
        let mut driver = driver(70);
        assert_eq!(driver.phase(), DriverPhase::Stopped);
        assert!(driver.take_scheduled().is_none());
    }

    #[test]
    fn test_reset_draws_once_and_schedules() {
        let mut driver = driver(70);
        let mut s = surface();

        driver.reset(&mut s);

        assert_eq!(driver.phase(), DriverPhase::Running);
        assert_eq!(s.clears(), 1);
        assert!(driver.is_scheduled());
        assert_eq!(driver.state().history().len(), 1);
    }

    #[test]
    fn test_tick_advances_and_reschedules() {
        let mut driver = driver(70);
        let mut s = surface();
        driver.reset(&mut s);

        let handle = driver.take_scheduled().unwrap();
        let outcome = driver.tick(handle, &mut s);

        assert_eq!(outcome, TickOutcome::Ran { rescheduled: true });
        assert_eq!(s.clears(), 2);
        assert_eq!(driver.state().history().len(), 2);
        assert!(driver.is_scheduled());
    }

    #[test]
    fn test_reset_revokes_outstanding_handle() {
        let mut driver = driver(70);
        let mut s = surface();
        driver.reset(&mut s);
        let stale = driver.take_scheduled().unwrap();

        driver.reset(&mut s);
        let before = driver.state().clone();

        assert_eq!(driver.tick(stale, &mut s), TickOutcome::Revoked);
        assert_eq!(driver.state(), &before);
        // The fresh loop is still pending and only it may advance the run
        let fresh = driver.take_scheduled().unwrap();
        assert_eq!(
            driver.tick(fresh, &mut s),
            TickOutcome::Ran { rescheduled: true }
        );
        assert_eq!(driver.state().history().len(), 2);
    }

    #[test]
    fn test_stops_when_decayed_and_stays_stopped() {
        let mut driver = driver(100);
        let mut s = surface();
        driver.reset(&mut s);

        let mut frames = 0;
        while let Some(handle) = driver.take_scheduled() {
            driver.tick(handle, &mut s);
            frames += 1;
            assert!(frames < 10_000);
        }

        assert_eq!(driver.phase(), DriverPhase::Stopped);
        assert!(!driver.state().is_running());
        assert_eq!(driver.state().current_mass(), 0.0);
        // Final frame still repainted
        assert_eq!(s.clears(), frames + 1);
    }

    #[test]
    fn test_reset_restarts_after_stop() {
        let mut driver = AnimationDriver::new(
            PlasticKind::Pe,
            100,
            SimParams {
                mass_epsilon: 100.0,
                ..SimParams::default()
            },
        );
        let mut s = surface();
        driver.reset(&mut s);
        let handle = driver.take_scheduled().unwrap();
        assert_eq!(
            driver.tick(handle, &mut s),
            TickOutcome::Ran { rescheduled: false }
        );
        assert_eq!(driver.phase(), DriverPhase::Stopped);

        driver.reset(&mut s);
        assert_eq!(driver.phase(), DriverPhase::Running);
        assert!(driver.is_scheduled());
        assert_eq!(driver.state().current_mass(), 10.0);
    }

    #[test]
    fn test_material_change_applies_on_reset() {
        let mut driver = driver(70);
        let mut s = surface();
        driver.reset(&mut s);

        driver.set_material(PlasticKind::Pp);
        driver.reset(&mut s);
        assert_eq!(driver.material().kind, PlasticKind::Pp);
        assert_eq!(driver.state().current_mass(), PlasticKind::Pp.profile().initial_mass);
    }

    #[test]
    fn test_uv_is_clamped_and_applied_next_tick() {
        let mut driver = driver(70);
        driver.set_uv_intensity(250);
        assert_eq!(driver.uv_intensity(), 100);

        let mut s = surface();
        driver.reset(&mut s);
        driver.set_uv_intensity(0);
        let handle = driver.take_scheduled().unwrap();
        driver.tick(handle, &mut s);
        assert_eq!(driver.state().current_mass(), 10.0);
    }
}
