//! Browser entry point of the Folio site.

use app::App;
use folio_core::{BuildMode, Config};
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

/// The site's `config.toml`, embedded when the frontend is compiled.
const SITE_CONFIG: &str = include_str!("../../config.toml");

/// Console log level for a build mode.
pub fn log_level(mode: BuildMode) -> log::Level {
    if mode.is_production() {
        log::Level::Info
    } else {
        log::Level::Debug
    }
}

/// Parse the embedded site configuration, falling back to defaults.
pub fn site_config(content: &str) -> Config {
    Config::parse(content).unwrap_or_else(|err| {
        log::error!("Invalid site configuration, using defaults: {err}");
        Config::default()
    })
}

/// Install the panic hook and console logger, then mount the app.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let mode = BuildMode::from_build_env();
    // Fails only when a logger is already set.
    let _ = console_log::init_with_level(log_level(mode));
    log::info!("Starting Folio ({mode} build)");

    let config = site_config(SITE_CONFIG);
    leptos::mount::mount_to_body(move || view! { <App config=config mode=mode /> });
}
