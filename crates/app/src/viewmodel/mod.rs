//! View model bindings for Slint UI

mod groups;
mod programs;

use std::cell::RefCell;
use std::rc::Rc;

use slint::{ModelRc, SharedString, VecModel};

use crate::controller::{Controller, Feedback};
use crate::{MainWindow, PathItem};

/// The controller is only touched from the UI thread
pub type SharedController = Rc<RefCell<Controller>>;

pub fn setup_bindings(window: &MainWindow, controller: SharedController) {
    window.set_shortcuts_available(controller.borrow().store().resolver().is_available());

    groups::setup_group_bindings(window, controller.clone());
    programs::setup_program_bindings(window, controller.clone());

    refresh(window, &controller.borrow());
}

/// Re-render groups and the active group's paths from controller state
pub(crate) fn refresh(window: &MainWindow, controller: &Controller) {
    let names: Vec<SharedString> = controller
        .group_names()
        .into_iter()
        .map(SharedString::from)
        .collect();
    window.set_group_names(ModelRc::new(VecModel::from(names)));
    window.set_active_group(controller.active_group().unwrap_or_default().into());

    let paths: Vec<PathItem> = controller
        .active_paths()
        .into_iter()
        .map(|path| PathItem {
            path: path.into(),
            selected: false,
        })
        .collect();
    window.set_paths(ModelRc::new(VecModel::from(paths)));
}

/// Show a message in the status line and log it
pub(crate) fn show_feedback(window: &MainWindow, feedback: &Feedback) {
    match feedback.level {
        crate::controller::FeedbackLevel::Error => {
            tracing::warn!(title = %feedback.title, message = %feedback.message, "Action failed")
        }
        _ => tracing::debug!(title = %feedback.title, message = %feedback.message, "Action feedback"),
    }

    window.set_status_title(feedback.title.clone().into());
    window.set_status_text(feedback.message.clone().into());
    window.set_status_level(feedback.level.as_index());
}
