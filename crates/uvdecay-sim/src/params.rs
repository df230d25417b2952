//! Tunable simulation parameters

use serde::{Deserialize, Serialize};

/// Step size, stop threshold and history bound for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Simulated minutes per tick
    pub dt: f64,
    /// Mass below which the run is considered finished (grams)
    pub mass_epsilon: f64,
    /// Maximum number of retained samples
    pub history_capacity: usize,
}

impl SimParams {
    pub const DEFAULT_DT: f64 = 0.1;
    pub const DEFAULT_MASS_EPSILON: f64 = 0.01;
    pub const DEFAULT_HISTORY_CAPACITY: usize = 300;

    /// Reject parameters that would run time backwards or never stop
    pub fn validate(&self) -> Result<(), String> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(format!("dt must be a positive number, got {}", self.dt));
        }
        if !(self.mass_epsilon.is_finite() && self.mass_epsilon > 0.0) {
            return Err(format!(
                "mass_epsilon must be a positive number, got {}",
                self.mass_epsilon
            ));
        }
        Ok(())
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt: Self::DEFAULT_DT,
            mass_epsilon: Self::DEFAULT_MASS_EPSILON,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
        }
    }
}
