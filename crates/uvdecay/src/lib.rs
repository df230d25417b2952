//! # UV Decay - plastic degradation under UV light
//!
//! Animates the mass of a plastic sample decaying under adjustable UV
//! intensity, with a live chart and point inspection.

pub mod app;
pub mod chart;
pub mod config;
pub mod driver;
#[cfg(not(target_arch = "wasm32"))]
pub mod export;
pub mod render;
pub mod ui;

pub use app::App;
pub use uvdecay_sim as sim;

// WASM entry point
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages in the browser console
    console_error_panic_hook::set_once();

    // Initialize logging for WASM
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {}", e).into());
    }

    log::info!("UV Decay WASM module initialized");
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn run() -> Result<(), JsValue> {
    log::info!("Starting UV Decay (WASM)");

    let (app, event_loop) = App::new(config::AppConfig::default())
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to create app: {}", e)))?;

    App::run(event_loop, app).map_err(|e| JsValue::from_str(&format!("Failed to run app: {}", e)))
}
