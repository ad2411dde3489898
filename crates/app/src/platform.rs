//! Platform information
//!
//! Logs what the launcher can and cannot do on this machine. Shortcut
//! resolution is only available where the shell automation object exists;
//! elsewhere plain executable paths have to be used.

use std::env;
use std::path::Path;

use grouplaunch_core::GroupStore;

/// Short description of the running platform, e.g. `windows (x86_64)`
pub fn platform_summary() -> String {
    format!("{} ({})", env::consts::OS, env::consts::ARCH)
}

/// Log platform information at startup
pub fn log_platform_info(config_file: Option<&Path>, store: &GroupStore) {
    tracing::info!(platform = %platform_summary(), "Platform detected");

    let shortcuts = store.resolver().is_available();
    tracing::info!(available = shortcuts, "Shortcut resolution");
    if !shortcuts {
        tracing::debug!("Shortcut files will be rejected; add .exe paths directly");
    }

    match config_file {
        Some(path) => tracing::info!(config = %path.display(), "Using config file"),
        None => tracing::debug!("No config file found, using defaults"),
    }
    tracing::info!(file = %store.file().display(), "Groups file");

    // Log Slint backend if overridden
    if let Ok(backend) = env::var("SLINT_BACKEND") {
        tracing::info!(backend = %backend, "Slint backend override");
    }
}
