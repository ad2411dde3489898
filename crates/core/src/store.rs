//! Group storage
//!
//! Owns the group collection and the JSON file it lives in. Every mutation is
//! applied in memory first and then written out; a failed write is reported
//! but does not undo the mutation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::groups::GroupCollection;
use crate::invariants::assert_collection_invariants;
use crate::paths::{is_executable_file, same_entry, strip_input, PathNormalizer};
use crate::shortcut::{Resolution, ShortcutResolver};

/// Outcome of adding several raw paths in one action
#[derive(Debug, Default)]
pub struct BatchAdd {
    /// Entries appended, in input order
    pub added: Vec<String>,
    /// Raw inputs that were refused, with the reason
    pub rejected: Vec<(String, Error)>,
}

impl BatchAdd {
    /// True when every rejection was a duplicate
    pub fn only_duplicates(&self) -> bool {
        self.rejected
            .iter()
            .all(|(_, e)| matches!(e, Error::DuplicatePath { .. }))
    }
}

/// Persistent store for launch groups
pub struct GroupStore {
    file: PathBuf,
    default_group: String,
    normalizer: PathNormalizer,
    resolver: Box<dyn ShortcutResolver>,
    groups: GroupCollection,
}

impl GroupStore {
    /// Open the store described by the config and load its file
    pub fn open(config: &AppConfig, resolver: Box<dyn ShortcutResolver>) -> Self {
        Self::with_parts(
            config.groups_file.clone(),
            config.default_group.clone(),
            config.normalizer(),
            resolver,
        )
    }

    pub fn with_parts(
        file: PathBuf,
        default_group: String,
        normalizer: PathNormalizer,
        resolver: Box<dyn ShortcutResolver>,
    ) -> Self {
        let mut store = Self {
            file,
            default_group,
            normalizer,
            resolver,
            groups: GroupCollection::new(),
        };
        store.groups = store.load();
        store
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn groups(&self) -> &GroupCollection {
        &self.groups
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.names().map(str::to_string).collect()
    }

    pub fn paths(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group)
    }

    pub fn resolver(&self) -> &dyn ShortcutResolver {
        self.resolver.as_ref()
    }

    /// Read the groups file.
    ///
    /// Never fails: a missing, unreadable or malformed file yields the default
    /// collection, and entries that no longer point at a file are dropped.
    #[instrument(skip(self), fields(file = %self.file.display()))]
    pub fn load(&self) -> GroupCollection {
        match self.read_file() {
            Ok(Some(loaded)) if !loaded.is_empty() => self.heal(loaded),
            Ok(Some(_)) => {
                info!("Groups file has no groups, starting with default group");
                GroupCollection::with_default(&self.default_group)
            }
            Ok(None) => {
                info!("No groups file yet, starting with default group");
                GroupCollection::with_default(&self.default_group)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load groups, starting with default group");
                GroupCollection::with_default(&self.default_group)
            }
        }
    }

    fn read_file(&self) -> Result<Option<GroupCollection>> {
        let read_error = |source: Error| Error::StorageRead {
            path: self.file.clone(),
            source: Box::new(source),
        };

        let text = match fs::read_to_string(&self.file) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_error(e.into())),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| read_error(e.into()))
    }

    /// Re-normalize loaded entries and drop the ones that went stale
    fn heal(&self, loaded: GroupCollection) -> GroupCollection {
        let mut healed = GroupCollection::new();

        for group in &loaded {
            if group.name.trim().is_empty() {
                warn!("Skipping group with empty name");
                continue;
            }

            let mut paths: Vec<String> = Vec::with_capacity(group.paths.len());
            for raw in &group.paths {
                let path = self.normalizer.normalize(raw);
                if !Path::new(&path).is_file() {
                    info!(group = %group.name, path = %path, "Dropping entry that no longer exists");
                    continue;
                }
                if paths.iter().any(|existing| same_entry(existing, &path)) {
                    debug!(group = %group.name, path = %path, "Dropping duplicate entry");
                    continue;
                }
                paths.push(path);
            }
            healed.insert(group.name.clone(), paths);
        }

        healed
    }

    /// Write the whole collection, replacing the file
    #[instrument(skip(self), fields(file = %self.file.display()))]
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.groups)?;
        let write_error = |source| Error::StorageWrite {
            path: self.file.clone(),
            source,
        };

        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.file, json).map_err(write_error)?;

        debug!(groups = self.groups.len(), "Saved groups");
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        assert_collection_invariants(&self.groups);
        self.save()
    }

    /// Create an empty group
    pub fn add_group(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidGroupName);
        }
        if self.groups.contains(name) {
            return Err(Error::DuplicateGroup(name.to_string()));
        }

        self.groups.insert(name.to_string(), Vec::new());
        info!(group = %name, "Added group");
        self.commit()
    }

    /// Remove a group; returns whether it existed
    pub fn delete_group(&mut self, name: &str) -> Result<bool> {
        if self.groups.remove(name).is_none() {
            return Ok(false);
        }

        info!(group = %name, "Deleted group");
        self.commit()?;
        Ok(true)
    }

    /// Turn raw input into a storable entry.
    ///
    /// Shortcuts are resolved to their target first; the result must be an
    /// existing `.exe` file.
    pub fn prepare_path(&self, raw: &str) -> Result<String> {
        let cleaned = strip_input(raw);
        let target = match self.resolver.resolve(Path::new(cleaned)) {
            Resolution::NotApplicable => cleaned.to_string(),
            Resolution::Resolved(target) => {
                debug!(shortcut = %cleaned, target = %target.display(), "Resolved shortcut");
                target.to_string_lossy().into_owned()
            }
            Resolution::Unresolved(reason) => {
                return Err(Error::UnresolvableShortcut {
                    path: cleaned.to_string(),
                    reason,
                })
            }
        };

        let entry = self.normalizer.normalize(&target);
        if !is_executable_file(Path::new(&entry)) {
            return Err(Error::FileNotFound(entry));
        }
        Ok(entry)
    }

    fn append(&mut self, group: &str, entry: String) -> Result<String> {
        let paths = self
            .groups
            .get_mut(group)
            .ok_or_else(|| Error::GroupNotFound(group.to_string()))?;

        if paths.iter().any(|existing| same_entry(existing, &entry)) {
            return Err(Error::DuplicatePath {
                group: group.to_string(),
                path: entry,
            });
        }

        paths.push(entry.clone());
        info!(group = %group, path = %entry, "Added path");
        Ok(entry)
    }

    /// Add one raw path to a group, returning the stored entry
    pub fn add_path(&mut self, group: &str, raw: &str) -> Result<String> {
        if !self.groups.contains(group) {
            return Err(Error::GroupNotFound(group.to_string()));
        }

        let entry = self.prepare_path(raw)?;
        let entry = self.append(group, entry)?;
        self.commit()?;
        Ok(entry)
    }

    /// Add several raw paths, saving once.
    ///
    /// Blank inputs are skipped. Individual failures are collected instead of
    /// aborting the batch.
    pub fn add_paths<S: AsRef<str>>(&mut self, group: &str, raws: &[S]) -> Result<BatchAdd> {
        if !self.groups.contains(group) {
            return Err(Error::GroupNotFound(group.to_string()));
        }

        let mut batch = BatchAdd::default();
        for raw in raws {
            let raw = raw.as_ref();
            if strip_input(raw).is_empty() {
                continue;
            }

            match self
                .prepare_path(raw)
                .and_then(|entry| self.append(group, entry))
            {
                Ok(entry) => batch.added.push(entry),
                Err(e) => {
                    debug!(group = %group, raw = %raw, error = %e, "Rejected path");
                    batch.rejected.push((raw.to_string(), e));
                }
            }
        }

        if !batch.added.is_empty() {
            self.commit()?;
        }
        Ok(batch)
    }

    /// Remove entries by position; returns the removed entries in list order.
    ///
    /// Duplicate and out-of-range indices are ignored.
    pub fn remove_paths(&mut self, group: &str, indices: &[usize]) -> Result<Vec<String>> {
        if indices.is_empty() {
            info!(group = %group, "No paths selected for removal");
            return Ok(Vec::new());
        }

        let paths = self
            .groups
            .get_mut(group)
            .ok_or_else(|| Error::GroupNotFound(group.to_string()))?;

        let mut order = indices.to_vec();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order.dedup();

        let mut removed = Vec::new();
        for idx in order {
            if idx < paths.len() {
                removed.push(paths.remove(idx));
            } else {
                warn!(group = %group, index = idx, "Ignoring out-of-range index");
            }
        }
        removed.reverse();

        if !removed.is_empty() {
            info!(group = %group, count = removed.len(), "Removed paths");
            self.commit()?;
        }
        Ok(removed)
    }
}
