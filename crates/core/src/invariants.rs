//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::groups::GroupCollection;
use crate::paths::same_entry;

/// Validate that a group collection is internally consistent
pub fn assert_collection_invariants(groups: &GroupCollection) {
    for (idx, group) in groups.iter().enumerate() {
        // Names must not be empty
        debug_assert!(
            !group.name.trim().is_empty(),
            "Group at position {} has empty name",
            idx
        );

        // Names are unique keys
        debug_assert!(
            groups.iter().filter(|g| g.name == group.name).count() == 1,
            "Group name '{}' appears more than once",
            group.name
        );

        assert_group_paths_unique(&group.name, &group.paths);
    }
}

/// Validate that a group's paths contain no duplicates
pub fn assert_group_paths_unique(group: &str, paths: &[String]) {
    for (idx, path) in paths.iter().enumerate() {
        debug_assert!(
            !paths[..idx].iter().any(|earlier| same_entry(earlier, path)),
            "Group '{}' contains duplicate path {}",
            group,
            path
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_collection() {
        let mut groups = GroupCollection::with_default("Default Group");
        groups.insert(
            "Work".to_string(),
            vec!["c:\\a.exe".to_string(), "c:\\b.exe".to_string()],
        );
        assert_collection_invariants(&groups);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "duplicate path")]
    fn test_duplicate_paths_detected() {
        assert_group_paths_unique("Work", &["c:\\a.exe".to_string(), "c:\\a.exe".to_string()]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "duplicate path")]
    fn test_duplicate_paths_differing_in_case_detected() {
        assert_group_paths_unique("Work", &["/apps/Tool.exe".to_string(), "/apps/tool.exe".to_string()]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "empty name")]
    fn test_blank_name_detected() {
        let mut groups = GroupCollection::new();
        groups.insert("  ".to_string(), vec![]);
        assert_collection_invariants(&groups);
    }
}
