use wasm_bindgen::prelude::*;

use crate::AppConfig;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load_from_local_storage().unwrap_or_default();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }

    log::info!("📜 ScrollSync WASM ready (log level {})", config.log_level.name());
}
