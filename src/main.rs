/// Scripted headless session for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use scrollsync::AppConfig;

    let save_config = std::env::args().skip(1).any(|arg| arg == "--save-config");
    let config = AppConfig::load_from_default_path().unwrap_or_default();

    // RUST_LOG still overrides the configured level
    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    log::info!(
        "📜 ScrollSync demo (log level {}, autohide {:?})",
        config.log_level.name(),
        config.options.autohide
    );
    let reports = scrollsync::demo::run(config.options.clone());
    log::info!("📜 {} steps completed", reports.len());

    if save_config {
        if let Err(e) = config.save_to_default_path() {
            eprintln!("Failed to save configuration: {}", e);
        }
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
