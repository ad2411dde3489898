//! Group Launcher Core Library
//!
//! Named groups of executable paths, their JSON storage, shortcut resolution
//! and batch launching. No UI code lives here.

pub mod config;
pub mod error;
pub mod groups;
pub mod invariants;
pub mod launcher;
pub mod paths;
pub mod shortcut;
pub mod store;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use groups::{Group, GroupCollection};
pub use launcher::{failure_summary, launch_all, LaunchOutcome, LaunchStatus};
pub use paths::PathNormalizer;
pub use shortcut::{Resolution, ShortcutResolver, SystemShortcutResolver};
pub use store::{BatchAdd, GroupStore};
