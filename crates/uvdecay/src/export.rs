//! Headless chart export
//!
//! Runs the same animation loop as the window, but against a CPU pixel
//! surface, and writes the final frame as a PNG.

use std::path::Path;

use anyhow::Result;
use uvdecay_sim::{PlasticKind, SimParams};

use crate::chart::PixelSurface;
use crate::driver::AnimationDriver;

/// Upper bound on frames when running until the plastic has decayed.
/// Zero UV never decays.
const MAX_FRAMES: u32 = 100_000;

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub material: PlasticKind,
    /// UV intensity in percent
    pub uv_intensity: u8,
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Frames to simulate after the reset (None = until fully decayed)
    pub ticks: Option<u32>,
    pub params: SimParams,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            material: PlasticKind::default(),
            uv_intensity: 70,
            width: 800,
            height: 450,
            ticks: None,
            params: SimParams::default(),
        }
    }
}

/// Run the simulation and return the last frame together with the driver
pub fn render_snapshot(request: &ExportRequest) -> (PixelSurface, AnimationDriver) {
    let mut surface = PixelSurface::new(request.width, request.height);
    let mut driver = AnimationDriver::new(request.material, request.uv_intensity, request.params);
    driver.reset(&mut surface);

    let limit = request.ticks.unwrap_or(MAX_FRAMES);
    let mut frames = 0;
    while frames < limit {
        let Some(handle) = driver.take_scheduled() else {
            break;
        };
        driver.tick(handle, &mut surface);
        frames += 1;
    }

    if request.ticks.is_none() && driver.is_scheduled() {
        log::warn!(
            "{} still decaying after {} frames, exporting current state",
            driver.material().name,
            frames
        );
    }
    log::debug!(
        "Simulated {} frames: t = {:.1} min, mass = {:.3} g",
        frames,
        driver.state().elapsed_time(),
        driver.state().current_mass()
    );

    (surface, driver)
}

/// Render a chart snapshot and save it as PNG
pub fn export_png(request: &ExportRequest, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    if request.width == 0 || request.height == 0 {
        anyhow::bail!("Invalid export size {}x{}", request.width, request.height);
    }
    request
        .params
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid simulation parameters: {}", e))?;

    log::info!("Exporting chart to {}", output_path.display());
    log::info!("  Resolution: {}x{}", request.width, request.height);
    log::info!("  Material: {}, UV: {}%", request.material, request.uv_intensity);

    let (surface, _) = render_snapshot(request);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    surface.save_png(output_path)?;

    log::info!("Chart saved to {}", output_path.display());
    Ok(())
}
