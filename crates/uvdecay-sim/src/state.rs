//! Per-run simulation state with bounded sample history

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::decay::compute_mass;
use crate::materials::MaterialProfile;
use crate::params::SimParams;

/// One (time, mass) observation kept for plotting and hit-testing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Elapsed exposure time (minutes)
    pub time: f64,
    /// Remaining mass (grams)
    pub mass: f64,
}

impl Sample {
    pub const fn new(time: f64, mass: f64) -> Self {
        Self { time, mass }
    }
}

/// Mutable state of a single decay run
///
/// Created by [`SimulationState::new`] or [`SimulationState::reset`], advanced
/// once per tick. Once the mass drops below `params.mass_epsilon` the run stops
/// and further calls to [`SimulationState::advance`] do nothing until reset.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    elapsed_time: f64,
    current_mass: f64,
    history: VecDeque<Sample>,
    running: bool,
    params: SimParams,
}

impl SimulationState {
    /// Fresh run for `material` with default parameters
    pub fn new(material: &MaterialProfile) -> Self {
        Self::with_params(material, SimParams::default())
    }

    /// Fresh run for `material` with custom parameters
    pub fn with_params(material: &MaterialProfile, params: SimParams) -> Self {
        let mut state = Self {
            elapsed_time: 0.0,
            current_mass: material.initial_mass,
            history: VecDeque::with_capacity(params.history_capacity.max(1) + 1),
            running: true,
            params,
        };
        state.reset(material);
        state
    }

    /// Discard the current run and start over at t = 0
    pub fn reset(&mut self, material: &MaterialProfile) {
        self.elapsed_time = 0.0;
        self.current_mass = material.initial_mass;
        self.running = true;
        self.history.clear();
        self.history.push_back(Sample::new(0.0, material.initial_mass));
    }

    /// Advance one tick of `params.dt` minutes at the given UV intensity
    pub fn advance(&mut self, material: &MaterialProfile, uv_intensity: u8) {
        if !self.running {
            return;
        }

        self.elapsed_time += self.params.dt;
        self.current_mass = compute_mass(
            material.initial_mass,
            material.decay_constant,
            f64::from(uv_intensity),
            self.elapsed_time,
        );

        if self.current_mass < self.params.mass_epsilon {
            self.current_mass = 0.0;
            self.running = false;
            log::debug!(
                "{} fully decayed after {:.1} min",
                material.name,
                self.elapsed_time
            );
        }

        self.history.push_back(Sample::new(self.elapsed_time, self.current_mass));
        while self.history.len() > self.params.history_capacity.max(1) {
            self.history.pop_front();
        }
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn current_mass(&self) -> f64 {
        self.current_mass
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Retained samples, oldest first
    pub fn history(&self) -> &VecDeque<Sample> {
        &self.history
    }

    /// Most recent sample (always present after reset)
    pub fn latest(&self) -> Option<&Sample> {
        self.history.back()
    }

    /// Largest retained sample time
    pub fn max_time(&self) -> f64 {
        self.history.iter().map(|s| s.time).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::PlasticKind;

    #[test]
    fn test_new_state_matches_reset() {
        let pet = PlasticKind::Pet.profile();
        let state = SimulationState::new(&pet);

        assert_eq!(state.elapsed_time(), 0.0);
        assert_eq!(state.current_mass(), 10.0);
        assert!(state.is_running());
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.latest(), Some(&Sample::new(0.0, 10.0)));
    }

    #[test]
    fn test_advance_appends_sample() {
        let pet = PlasticKind::Pet.profile();
        let mut state = SimulationState::new(&pet);

        state.advance(&pet, 100);

        assert_eq!(state.history().len(), 2);
        let latest = state.latest().unwrap();
        assert!((latest.time - 0.1).abs() < 1e-12);
        assert!(latest.mass < 10.0);
        assert_eq!(latest.mass, state.current_mass());
    }

    #[test]
    fn test_advance_is_noop_when_stopped() {
        let pet = PlasticKind::Pet.profile();
        let params = SimParams {
            // Anything below initial mass stops on the first tick
            mass_epsilon: 20.0,
            ..SimParams::default()
        };
        let mut state = SimulationState::with_params(&pet, params);

        state.advance(&pet, 70);
        assert!(!state.is_running());
        assert_eq!(state.current_mass(), 0.0);

        let snapshot = state.clone();
        state.advance(&pet, 70);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_reset_after_stop_restarts() {
        let pet = PlasticKind::Pet.profile();
        let params = SimParams {
            mass_epsilon: 20.0,
            ..SimParams::default()
        };
        let mut state = SimulationState::with_params(&pet, params);
        state.advance(&pet, 70);
        assert!(!state.is_running());

        state.reset(&pet);
        assert!(state.is_running());
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_small_capacity_keeps_latest() {
        let pe = PlasticKind::Pe.profile();
        let params = SimParams {
            history_capacity: 0,
            ..SimParams::default()
        };
        let mut state = SimulationState::with_params(&pe, params);
        state.advance(&pe, 70);
        state.advance(&pe, 70);

        assert_eq!(state.history().len(), 1);
        assert!((state.latest().unwrap().time - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_max_time_tracks_latest_sample() {
        let pp = PlasticKind::Pp.profile();
        let mut state = SimulationState::new(&pp);
        assert_eq!(state.max_time(), 0.0);
        for _ in 0..5 {
            state.advance(&pp, 70);
        }
        assert!((state.max_time() - 0.5).abs() < 1e-9);
    }
}
