//! Error types for Group Launcher Core

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Group '{0}' already exists")]
    DuplicateGroup(String),

    #[error("Group name must not be empty")]
    InvalidGroupName,

    #[error("Group '{0}' not found")]
    GroupNotFound(String),

    #[error("'{path}' is already in group '{group}'")]
    DuplicatePath { group: String, path: String },

    #[error("Not an existing .exe file: {0}")]
    FileNotFound(String),

    #[error("Failed to resolve shortcut '{path}' to an .exe: {reason}")]
    UnresolvableShortcut { path: String, reason: String },

    #[error("Failed to read groups from {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to save groups to {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Validation failures block a single mutation but leave the store untouched
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::DuplicateGroup(_)
                | Error::InvalidGroupName
                | Error::GroupNotFound(_)
                | Error::DuplicatePath { .. }
                | Error::FileNotFound(_)
                | Error::UnresolvableShortcut { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
