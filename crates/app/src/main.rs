//! Group Launcher - start a whole group of programs with one click
//!
//! Groups of executables are kept in a JSON file in the working directory.

use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use grouplaunch_core::{AppConfig, GroupStore, SystemShortcutResolver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod clipboard;
mod controller;
mod picker;
mod platform;
mod viewmodel;

slint::include_modules!();

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting Group Launcher");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    let store = GroupStore::open(&config, Box::new(SystemShortcutResolver));

    // Log platform and storage information
    platform::log_platform_info(AppConfig::locate().as_deref(), &store);

    let controller = Rc::new(RefCell::new(controller::Controller::new(store)));

    // Create main window
    let main_window = match MainWindow::new() {
        Ok(window) => window,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create main window");
            return ExitCode::FAILURE;
        }
    };

    // Set up view model bindings
    viewmodel::setup_bindings(&main_window, controller);

    // Run the application
    if let Err(e) = main_window.run() {
        tracing::error!(error = %e, "Event loop failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
