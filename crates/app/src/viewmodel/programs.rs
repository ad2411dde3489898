//! Program list view model

use slint::{ComponentHandle, Model};

use super::{refresh, show_feedback, SharedController};
use crate::clipboard;
use crate::picker;
use crate::controller::Feedback;
use crate::MainWindow;

pub fn setup_program_bindings(window: &MainWindow, controller: SharedController) {
    // Add a typed path
    let ctrl = controller.clone();
    let window_weak = window.as_weak();
    window.on_add_path(move |raw| {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        let feedback = ctrl.borrow_mut().add_paths(&[raw.as_str()]);
        refresh(&w, &ctrl.borrow());
        show_feedback(&w, &feedback);
    });

    // Pick programs with the native file dialog
    let ctrl = controller.clone();
    let window_weak = window.as_weak();
    window.on_browse_programs(move || {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        let shortcuts = ctrl.borrow().store().resolver().is_available();
        let Some(feedback) = ctrl.borrow_mut().add_picked(picker::pick_programs(shortcuts)) else {
            return;
        };
        refresh(&w, &ctrl.borrow());
        show_feedback(&w, &feedback);
    });

    // Paste paths from the clipboard
    let ctrl = controller.clone();
    let window_weak = window.as_weak();
    window.on_paste_clipboard(move || {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        let feedback = match clipboard::read_text() {
            Ok(text) => ctrl.borrow_mut().paste_text(&text),
            Err(reason) => {
                tracing::debug!(reason = %reason, "Clipboard paste failed");
                Feedback::info("Info", "Clipboard does not contain a path.")
            }
        };
        refresh(&w, &ctrl.borrow());
        show_feedback(&w, &feedback);
    });

    // Track row selection
    let window_weak = window.as_weak();
    window.on_toggle_path(move |index, checked| {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        let paths = w.get_paths();
        let Ok(row) = usize::try_from(index) else {
            return;
        };
        if let Some(mut item) = paths.row_data(row) {
            item.selected = checked;
            paths.set_row_data(row, item);
        }
    });

    // Remove selected rows
    let ctrl = controller.clone();
    let window_weak = window.as_weak();
    window.on_remove_selected(move || {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        let selected: Vec<usize> = w
            .get_paths()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.selected)
            .map(|(idx, _)| idx)
            .collect();

        let feedback = ctrl.borrow_mut().remove_paths(&selected);
        refresh(&w, &ctrl.borrow());
        show_feedback(&w, &feedback);
    });

    // Launch the active group
    let ctrl = controller;
    let window_weak = window.as_weak();
    window.on_launch_all(move || {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        let feedback = ctrl.borrow().launch_active();
        show_feedback(&w, &feedback);
    });

    window.on_quit(|| {
        if let Err(e) = slint::quit_event_loop() {
            tracing::warn!(error = %e, "Failed to stop event loop");
        }
    });
}
