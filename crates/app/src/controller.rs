//! Application controller
//!
//! Holds the group store and the active-group selection. UI callbacks go
//! through here and re-render from the returned state; nothing else mutates
//! the store.

use std::path::PathBuf;

use grouplaunch_core::paths::strip_input;
use grouplaunch_core::{failure_summary, launch_all, BatchAdd, Error, GroupStore};

/// Severity of a message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Info,
    Warning,
    Error,
}

impl FeedbackLevel {
    /// Numeric level used by the UI status line
    pub fn as_index(&self) -> i32 {
        match self {
            Self::Info => 0,
            Self::Warning => 1,
            Self::Error => 2,
        }
    }
}

/// Human-readable result of a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub title: String,
    pub message: String,
}

impl Feedback {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Error, title, message)
    }

    fn new(level: FeedbackLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct Controller {
    store: GroupStore,
    active_group: Option<String>,
}

impl Controller {
    /// Wrap a loaded store; the first group starts active
    pub fn new(store: GroupStore) -> Self {
        let active_group = store.groups().first_name().map(str::to_string);
        Self {
            store,
            active_group,
        }
    }

    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    pub fn group_names(&self) -> Vec<String> {
        self.store.group_names()
    }

    pub fn active_group(&self) -> Option<&str> {
        self.active_group.as_deref()
    }

    /// Switch the active group; unknown names are ignored
    pub fn select_group(&mut self, name: &str) -> bool {
        if self.store.groups().contains(name) {
            self.active_group = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Paths of the active group, in display order
    pub fn active_paths(&self) -> Vec<String> {
        self.active_group
            .as_deref()
            .and_then(|group| self.store.paths(group))
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    pub fn add_group(&mut self, name: &str) -> Feedback {
        match self.store.add_group(name) {
            Ok(()) => {
                self.active_group = Some(name.to_string());
                Feedback::info("Group added", format!("Group '{}' created.", name))
            }
            Err(e @ Error::StorageWrite { .. }) => {
                self.active_group = Some(name.to_string());
                Feedback::error("Save failed", e.to_string())
            }
            Err(e @ Error::DuplicateGroup(_)) => Feedback::info("Info", e.to_string()),
            Err(e) => Feedback::warning("Invalid group name", e.to_string()),
        }
    }

    /// Delete the active group (the UI asks for confirmation first)
    pub fn delete_active_group(&mut self) -> Feedback {
        let Some(name) = self.active_group.clone() else {
            return Feedback::info("Info", "No group selected.");
        };

        let result = self.store.delete_group(&name);
        self.active_group = self.store.groups().first_name().map(str::to_string);

        match result {
            Ok(_) => Feedback::info("Group deleted", format!("Group '{}' deleted.", name)),
            Err(e) => Feedback::error("Save failed", e.to_string()),
        }
    }

    /// Add raw paths from the file field, clipboard or a drop
    pub fn add_paths<S: AsRef<str>>(&mut self, raws: &[S]) -> Feedback {
        let Some(group) = self.active_group.clone() else {
            return Feedback::warning("No group", "Create or select a group first.");
        };

        let raws: Vec<&str> = raws
            .iter()
            .map(AsRef::as_ref)
            .filter(|raw| !strip_input(raw).is_empty())
            .collect();

        match raws.as_slice() {
            [] => Feedback::info("Info", "Nothing to add."),
            [raw] => match self.store.add_path(&group, raw) {
                Ok(entry) => Feedback::info("Program added", format!("Added {}", entry)),
                Err(e) => single_add_feedback(e),
            },
            many => match self.store.add_paths(&group, many) {
                Ok(batch) => batch_feedback(&batch),
                Err(e) => Feedback::error("Save failed", e.to_string()),
            },
        }
    }

    /// Add the files chosen in the picker; `None` when the dialog was cancelled
    pub fn add_picked(&mut self, picked: Option<Vec<PathBuf>>) -> Option<Feedback> {
        let picked = picked.filter(|files| !files.is_empty())?;
        let raws: Vec<String> = picked
            .iter()
            .map(|file| file.to_string_lossy().into_owned())
            .collect();
        Some(self.add_paths(&raws))
    }

    /// Add whatever paths the pasted text contains
    pub fn paste_text(&mut self, text: &str) -> Feedback {
        let raws = split_path_list(text);
        if raws.is_empty() {
            return Feedback::info("Info", "Clipboard does not contain a path.");
        }
        self.add_paths(&raws)
    }

    /// Remove entries of the active group by position
    pub fn remove_paths(&mut self, indices: &[usize]) -> Feedback {
        if indices.is_empty() {
            return Feedback::info("Info", "Please select the program(s) to remove first.");
        }
        let Some(group) = self.active_group.clone() else {
            return Feedback::info("Info", "No group selected.");
        };

        match self.store.remove_paths(&group, indices) {
            Ok(removed) => Feedback::info(
                "Programs removed",
                format!("Removed {} program(s) from '{}'.", removed.len(), group),
            ),
            Err(e) => Feedback::error("Save failed", e.to_string()),
        }
    }

    /// Launch every program of the active group
    pub fn launch_active(&self) -> Feedback {
        let Some(group) = self.active_group.as_deref() else {
            return Feedback::warning("Warning", "No group selected.");
        };

        let paths = self.active_paths();
        if paths.is_empty() {
            return Feedback::warning("Warning", "No program in the current group!");
        }

        let outcomes = launch_all(&paths);
        match failure_summary(&outcomes) {
            None => Feedback::info(
                "OK",
                format!("All programs in group '{}' have been launched!", group),
            ),
            Some(summary) => Feedback::error("Failed to launch these programs", summary),
        }
    }
}

fn single_add_feedback(e: Error) -> Feedback {
    match e {
        Error::UnresolvableShortcut { .. } => Feedback::warning("Invalid Shortcut", e.to_string()),
        Error::DuplicatePath { .. } => Feedback::info("Info", e.to_string()),
        _ if e.is_validation() => Feedback::warning("Cannot add program", e.to_string()),
        _ => Feedback::error("Save failed", e.to_string()),
    }
}

fn batch_feedback(batch: &BatchAdd) -> Feedback {
    let reasons = batch
        .rejected
        .iter()
        .map(|(_, e)| e.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    match (batch.added.len(), batch.rejected.len()) {
        (0, _) if batch.only_duplicates() => Feedback::info(
            "Info",
            "All dropped EXE files are already in the current group, no duplicates added.",
        ),
        (0, _) => Feedback::warning("No programs added", reasons),
        (added, 0) => Feedback::info("Programs added", format!("Added {} program(s).", added)),
        (added, skipped) => Feedback::warning(
            "Some programs skipped",
            format!("Added {}, skipped {}:\n{}", added, skipped, reasons),
        ),
    }
}

/// Split a paste or drop payload into raw paths.
///
/// One path per line. Within a line, `{...}` groups a path that contains
/// spaces and bare tokens are split on whitespace; lines without braces are
/// taken whole.
pub fn split_path_list(text: &str) -> Vec<String> {
    let mut paths = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !line.contains('{') {
            paths.push(line.to_string());
            continue;
        }

        let mut rest = line;
        while !rest.is_empty() {
            rest = rest.trim_start();
            let (item, remainder) = if let Some(inner) = rest.strip_prefix('{') {
                match inner.find('}') {
                    Some(end) => (&inner[..end], &inner[end + 1..]),
                    None => (inner, ""),
                }
            } else {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                (&rest[..end], &rest[end..])
            };

            let item = item.trim();
            if !item.is_empty() {
                paths.push(item.to_string());
            }
            rest = remainder;
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use grouplaunch_core::{PathNormalizer, SystemShortcutResolver};
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn controller_in(dir: &TempDir) -> Controller {
        let store = GroupStore::with_parts(
            dir.path().join("apps_groups.json"),
            "Default Group".to_string(),
            PathNormalizer::default(),
            Box::new(SystemShortcutResolver),
        );
        Controller::new(store)
    }

    fn create_exe(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"MZ").unwrap();
        path
    }

    #[test]
    fn test_first_group_is_active() {
        let dir = tempdir().unwrap();
        let controller = controller_in(&dir);
        assert_eq!(controller.active_group(), Some("Default Group"));
        assert!(controller.active_paths().is_empty());
    }

    #[test]
    fn test_add_group_selects_it() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(&dir);

        let feedback = controller.add_group("Games");
        assert_eq!(feedback.level, FeedbackLevel::Info);
        assert_eq!(controller.active_group(), Some("Games"));
        assert_eq!(controller.group_names(), vec!["Default Group", "Games"]);

        let feedback = controller.add_group("Games");
        assert!(feedback.message.contains("already exists"));
        assert_eq!(controller.group_names().len(), 2);
    }

    #[test]
    fn test_select_unknown_group_ignored() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(&dir);
        assert!(!controller.select_group("Missing"));
        assert_eq!(controller.active_group(), Some("Default Group"));
    }

    #[test]
    fn test_delete_active_group_falls_back_to_first() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(&dir);
        controller.add_group("Work");

        controller.delete_active_group();
        assert_eq!(controller.active_group(), Some("Default Group"));

        controller.delete_active_group();
        assert_eq!(controller.active_group(), None);
        assert!(controller.group_names().is_empty());

        let feedback = controller.add_paths(&["anything.exe"]);
        assert_eq!(feedback.level, FeedbackLevel::Warning);
    }

    #[test]
    fn test_add_and_remove_paths() {
        let dir = tempdir().unwrap();
        let a = create_exe(&dir, "a.exe");
        let b = create_exe(&dir, "b.exe");
        let mut controller = controller_in(&dir);

        let raws = vec![
            a.to_string_lossy().to_string(),
            b.to_string_lossy().to_string(),
        ];
        let feedback = controller.add_paths(&raws);
        assert_eq!(feedback.message, "Added 2 program(s).");
        assert_eq!(controller.active_paths().len(), 2);

        let feedback = controller.add_paths(&raws);
        assert!(feedback.message.contains("already in the current group"));

        let feedback = controller.remove_paths(&[]);
        assert!(feedback.message.contains("select the program"));

        controller.remove_paths(&[0]);
        let remaining = controller.active_paths();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].ends_with("b.exe"));
    }

    #[test]
    fn test_single_path_errors_name_the_path() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(&dir);

        let missing = dir.path().join("ghost.exe");
        let feedback = controller.add_paths(&[missing.to_string_lossy()]);
        assert_eq!(feedback.level, FeedbackLevel::Warning);
        assert!(feedback.message.contains("ghost.exe"));
    }

    #[test]
    fn test_add_picked_files() {
        let dir = tempdir().unwrap();
        let a = create_exe(&dir, "a.exe");
        let b = create_exe(&dir, "b.exe");
        let mut controller = controller_in(&dir);

        assert_eq!(controller.add_picked(None), None);
        assert_eq!(controller.add_picked(Some(Vec::new())), None);

        let feedback = controller.add_picked(Some(vec![a.clone()])).unwrap();
        assert_eq!(feedback.title, "Program added");

        let feedback = controller.add_picked(Some(vec![a, b])).unwrap();
        assert_eq!(feedback.level, FeedbackLevel::Warning);
        assert_eq!(controller.active_paths().len(), 2);
    }

    #[test]
    fn test_paste_text_adds_each_line() {
        let dir = tempdir().unwrap();
        let a = create_exe(&dir, "a.exe");
        let b = create_exe(&dir, "b.exe");
        let mut controller = controller_in(&dir);

        let text = format!("\"{}\"\r\n\n  {}  \n", a.display(), b.display());
        controller.paste_text(&text);
        assert_eq!(controller.active_paths().len(), 2);

        let feedback = controller.paste_text("   \n");
        assert!(feedback.message.contains("does not contain a path"));
    }

    #[test]
    fn test_launch_empty_group_warns() {
        let dir = tempdir().unwrap();
        let controller = controller_in(&dir);

        let feedback = controller.launch_active();
        assert_eq!(feedback.level, FeedbackLevel::Warning);
        assert_eq!(feedback.message, "No program in the current group!");
    }

    #[test]
    fn test_launch_failure_is_itemized() {
        let dir = tempdir().unwrap();
        // Not a real program, so spawning fails on every platform
        let fake = create_exe(&dir, "fake.exe");
        let mut controller = controller_in(&dir);
        controller.add_paths(&[fake.to_string_lossy()]);

        let feedback = controller.launch_active();
        assert_eq!(feedback.level, FeedbackLevel::Error);
        assert!(feedback.message.contains("fake.exe"));
        assert!(feedback.message.contains("Launch failed:"));
    }

    #[test]
    fn test_split_path_list() {
        assert_eq!(
            split_path_list("C:\\Program Files\\App\\app.exe\nD:\\tool.exe"),
            vec!["C:\\Program Files\\App\\app.exe", "D:\\tool.exe"]
        );
        assert_eq!(
            split_path_list("{C:/Program Files/a.exe} C:/b.exe {C:/c d.exe}"),
            vec!["C:/Program Files/a.exe", "C:/b.exe", "C:/c d.exe"]
        );
        assert_eq!(split_path_list("{unterminated path"), vec!["unterminated path"]);
        assert!(split_path_list(" \n\t\n").is_empty());
    }
}
