//! Program launcher
//!
//! Starts every path of a group as its own process. Children are never
//! tracked or killed: they keep running after this program exits. A detached
//! thread waits on each one so exited children do not linger as zombies.

use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};

/// Per-path result of a launch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStatus {
    Started { pid: u32 },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub path: String,
    pub status: LaunchStatus,
}

impl LaunchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, LaunchStatus::Started { .. })
    }
}

/// Spawn one program detached from our stdio, returning its pid.
///
/// The child runs in its own directory when the path has a parent.
pub fn launch(path: &str) -> Result<u32> {
    let program = Path::new(path);
    let mut command = Command::new(program);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    if let Some(dir) = program.parent().filter(|dir| dir.is_dir()) {
        command.current_dir(dir);
    }

    let child = command.spawn().map_err(|source| Error::Spawn {
        path: path.to_string(),
        source,
    })?;

    let pid = child.id();
    if let Err(e) = spawn_reaper(child) {
        tracing::debug!(pid = pid, error = %e, "Could not start reaper thread");
    }
    Ok(pid)
}

/// Wait for a launched child in the background without blocking the caller
fn spawn_reaper(mut child: Child) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    thread::Builder::new()
        .name(format!("reap-{}", child.id()))
        .spawn(move || match child.wait() {
            Ok(status) => {
                tracing::debug!(pid = child.id(), status = %status, "Launched program exited");
                Some(status)
            }
            Err(e) => {
                tracing::debug!(pid = child.id(), error = %e, "Failed to wait on launched program");
                None
            }
        })
}

/// Launch every path, isolating failures.
///
/// Always returns one outcome per input, in input order.
pub fn launch_all<S: AsRef<str>>(paths: &[S]) -> Vec<LaunchOutcome> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let status = match launch(path) {
                Ok(pid) => {
                    tracing::info!(path = %path, pid = pid, "Launched program");
                    LaunchStatus::Started { pid }
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Failed to launch program");
                    let message = match e {
                        Error::Spawn { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    LaunchStatus::Failed { message }
                }
            };
            LaunchOutcome {
                path: path.to_string(),
                status,
            }
        })
        .collect()
}

/// Itemized description of failed launches, or `None` if all started
pub fn failure_summary(outcomes: &[LaunchOutcome]) -> Option<String> {
    let failures: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| match &outcome.status {
            LaunchStatus::Failed { message } => {
                Some(format!("{}\n    Launch failed: {}", outcome.path, message))
            }
            LaunchStatus::Started { .. } => None,
        })
        .collect();

    if failures.is_empty() {
        None
    } else {
        Some(failures.join("\n\n"))
    }
}
