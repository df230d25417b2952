//! Closed-form exponential decay under UV exposure
//!
//! m(t) = m0 * exp(-k * (uv / 100) * t)

/// Decay rate after scaling the material constant by UV intensity (percent)
#[inline]
pub fn effective_rate(decay_constant: f64, uv_intensity_percent: f64) -> f64 {
    decay_constant * (uv_intensity_percent / 100.0)
}

/// Remaining mass after `elapsed_time` minutes of exposure
#[inline]
pub fn compute_mass(
    initial_mass: f64,
    decay_constant: f64,
    uv_intensity_percent: f64,
    elapsed_time: f64,
) -> f64 {
    let rate = effective_rate(decay_constant, uv_intensity_percent);
    initial_mass * (-rate * elapsed_time).exp()
}
