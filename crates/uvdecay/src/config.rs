//! Application configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `uvdecay.ron` file (if exists)
//! 3. Environment variables prefixed with `UVDECAY_`
//!
//! Example environment variable: `UVDECAY_CHART__HIT_RADIUS=24`
//!
//! WASM builds use the compiled defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uvdecay_sim::{PlasticKind, SimParams};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimParams,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Chart interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Pointer must be closer than this to a sample for the tooltip (surface units)
    pub hit_radius: f32,
    /// How long a click tooltip stays up (seconds)
    pub click_tooltip_secs: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            hit_radius: 18.0,
            click_tooltip_secs: 1.8,
        }
    }
}

impl ChartConfig {
    pub fn click_tooltip_duration(&self) -> Duration {
        Duration::from_secs_f32(self.click_tooltip_secs.max(0.0))
    }
}

/// Window and initial control settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial window width
    pub window_width: u32,
    /// Initial window height
    pub window_height: u32,
    /// Plastic selected at startup
    pub default_material: PlasticKind,
    /// UV intensity at startup (percent)
    pub default_uv_intensity: u8,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 600,
            default_material: PlasticKind::Pet,
            default_uv_intensity: 70,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `uvdecay.ron` file (if exists)
    /// 3. Environment variables prefixed with `UVDECAY_` (highest priority)
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("uvdecay")
    }

    /// Same as [`AppConfig::load`] with a custom config file stem
    pub fn load_from(file_stem: &str) -> anyhow::Result<Self> {
        Self::load_layered(file_stem, "UVDECAY")
    }

    fn load_layered(file_stem: &str, env_prefix: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        use config::{Config, Environment, File};

        let defaults = SimParams::default();
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("simulation.dt", defaults.dt)?
            .set_default("simulation.mass_epsilon", defaults.mass_epsilon)?
            .set_default(
                "simulation.history_capacity",
                defaults.history_capacity as i64,
            )?
            .set_default("chart.hit_radius", 18.0)?
            .set_default("chart.click_tooltip_secs", 1.8)?
            .set_default("ui.window_width", 960_i64)?
            .set_default("ui.window_height", 600_i64)?
            .set_default("ui.default_material", "pet")?
            .set_default("ui.default_uv_intensity", 70_i64)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(file_stem)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (UVDECAY_SIMULATION__DT, etc.)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

impl AppConfig {
    /// Check values that deserialize fine but would break the simulation or UI
    pub fn validate(&self) -> anyhow::Result<()> {
        self.simulation
            .validate()
            .map_err(|e| anyhow::anyhow!("simulation: {}", e))?;

        let chart = &self.chart;
        if !(chart.hit_radius.is_finite() && chart.hit_radius > 0.0) {
            anyhow::bail!(
                "chart: hit_radius must be a positive number, got {}",
                chart.hit_radius
            );
        }
        if !(chart.click_tooltip_secs.is_finite() && chart.click_tooltip_secs >= 0.0) {
            anyhow::bail!(
                "chart: click_tooltip_secs must be a non-negative number, got {}",
                chart.click_tooltip_secs
            );
        }
        if self.ui.default_uv_intensity > 100 {
            anyhow::bail!(
                "ui: default_uv_intensity must be at most 100, got {}",
                self.ui.default_uv_intensity
            );
        }
        Ok(())
    }
}
