//! Group collection model
//!
//! An ordered mapping from group name to an ordered list of path entries.
//! Serialized as a plain JSON object; key order on disk is the display order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named, ordered collection of executable paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCollection {
    groups: Vec<Group>,
}

impl GroupCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection used on first run: one empty group
    pub fn with_default(name: &str) -> Self {
        let mut collection = Self::new();
        collection.insert(name.to_string(), Vec::new());
        collection
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Group names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.groups.first().map(|g| g.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.paths.as_slice())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.groups
            .iter_mut()
            .find(|g| g.name == name)
            .map(|g| &mut g.paths)
    }

    /// Insert a group, or replace the paths of an existing one in place
    pub fn insert(&mut self, name: String, paths: Vec<String>) {
        match self.get_mut(&name) {
            Some(existing) => *existing = paths,
            None => self.groups.push(Group { name, paths }),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let idx = self.groups.iter().position(|g| g.name == name)?;
        Some(self.groups.remove(idx).paths)
    }
}

impl<'a> IntoIterator for &'a GroupCollection {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl Serialize for GroupCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &group.paths)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GroupCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = GroupCollection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping group names to lists of paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut collection = GroupCollection::new();
                while let Some((name, paths)) = access.next_entry::<String, Vec<String>>()? {
                    collection.insert(name, paths);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut groups = GroupCollection::new();
        groups.insert("Work".to_string(), vec![]);
        groups.insert("Games".to_string(), vec![]);
        groups.insert("Audio".to_string(), vec![]);

        let names: Vec<&str> = groups.names().collect();
        assert_eq!(names, vec!["Work", "Games", "Audio"]);

        groups.insert("Games".to_string(), vec!["c:\\games\\a.exe".to_string()]);
        let names: Vec<&str> = groups.names().collect();
        assert_eq!(names, vec!["Work", "Games", "Audio"]);
        assert_eq!(groups.get("Games").unwrap().len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut groups = GroupCollection::with_default("Default Group");
        groups.insert("Other".to_string(), vec![]);

        assert!(groups.remove("Default Group").is_some());
        assert!(groups.remove("Default Group").is_none());
        assert_eq!(groups.first_name(), Some("Other"));
    }

    #[test]
    fn test_json_keeps_key_order() {
        let json = r#"{"Zeta": ["z.exe"], "Alpha": [], "Mid": ["a.exe", "b.exe"]}"#;
        let groups: GroupCollection = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = groups.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(
            groups.get("Mid").unwrap().to_vec(),
            vec!["a.exe".to_string(), "b.exe".to_string()]
        );

        let written = serde_json::to_string(&groups).unwrap();
        assert_eq!(written, r#"{"Zeta":["z.exe"],"Alpha":[],"Mid":["a.exe","b.exe"]}"#);
    }

    #[test]
    fn test_group_names_are_case_sensitive() {
        let mut groups = GroupCollection::new();
        groups.insert("tools".to_string(), vec![]);
        assert!(!groups.contains("Tools"));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(serde_json::from_str::<GroupCollection>("[1, 2]").is_err());
        assert!(serde_json::from_str::<GroupCollection>(r#"{"A": "not a list"}"#).is_err());
    }
}
