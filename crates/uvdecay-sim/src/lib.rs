//! Plastic decay model and simulation state for UV Decay
//!
//! This crate holds everything that is pure simulation:
//! - Plastic material profiles (PlasticKind, MaterialProfile)
//! - The closed-form decay model (compute_mass, effective_rate)
//! - Per-run simulation state with bounded sample history (SimulationState, Sample)
//! - Tunable simulation parameters (SimParams)

mod decay;
mod materials;
mod params;
mod state;

pub use decay::{compute_mass, effective_rate};
pub use materials::{MaterialProfile, PlasticKind};
pub use params::SimParams;
pub use state::{Sample, SimulationState};
