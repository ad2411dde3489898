//! Native file picker for programs

use std::path::PathBuf;

use grouplaunch_core::paths::{EXECUTABLE_EXTENSION, SHORTCUT_EXTENSION};

/// Extensions offered in the dialog filter
pub fn program_extensions(shortcuts: bool) -> Vec<&'static str> {
    if shortcuts {
        vec![EXECUTABLE_EXTENSION, SHORTCUT_EXTENSION]
    } else {
        vec![EXECUTABLE_EXTENSION]
    }
}

/// Show a blocking multi-select dialog; `None` when cancelled
pub fn pick_programs(shortcuts: bool) -> Option<Vec<PathBuf>> {
    let extensions = program_extensions(shortcuts);
    let picked = rfd::FileDialog::new()
        .set_title("Select programs")
        .add_filter("Programs", extensions.as_slice())
        .add_filter("All files", &["*"])
        .pick_files();

    match &picked {
        Some(files) => tracing::debug!(count = files.len(), "Programs picked"),
        None => tracing::debug!("Program picker cancelled"),
    }
    picked
}
