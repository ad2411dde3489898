//! Group selection view model

use slint::ComponentHandle;

use super::{refresh, show_feedback, SharedController};
use crate::MainWindow;

pub fn setup_group_bindings(window: &MainWindow, controller: SharedController) {
    // Select group
    let ctrl = controller.clone();
    let window_weak = window.as_weak();
    window.on_select_group(move |name| {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        if !ctrl.borrow_mut().select_group(&name) {
            tracing::debug!(group = %name, "Ignoring selection of unknown group");
        }
        w.set_confirm_delete(false);
        refresh(&w, &ctrl.borrow());
    });

    // Add group
    let ctrl = controller.clone();
    let window_weak = window.as_weak();
    window.on_add_group(move |name| {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        let feedback = ctrl.borrow_mut().add_group(&name);
        refresh(&w, &ctrl.borrow());
        show_feedback(&w, &feedback);
    });

    // Delete group (confirmed in the UI)
    let ctrl = controller;
    let window_weak = window.as_weak();
    window.on_delete_group(move || {
        let Some(w) = window_weak.upgrade() else {
            return;
        };

        let feedback = ctrl.borrow_mut().delete_active_group();
        refresh(&w, &ctrl.borrow());
        show_feedback(&w, &feedback);
    });
}
