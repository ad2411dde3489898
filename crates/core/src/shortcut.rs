//! Shortcut resolution
//!
//! Shortcut files are never stored; only the executable they point at is.
//! Reading a `.lnk` target needs the Windows shell automation object, so the
//! system resolver shells out to PowerShell there and reports every other
//! platform as unsupported.

use std::path::{Path, PathBuf};

use crate::paths::{is_executable_file, is_shortcut};

/// Outcome of asking a resolver about a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not a shortcut file; use the path as-is
    NotApplicable,
    /// Shortcut points at an existing executable
    Resolved(PathBuf),
    /// Shortcut could not be turned into an executable path
    Unresolved(String),
}

/// Resolves shortcut files to their executable targets.
///
/// Implementations must not fail: any OS error becomes
/// [`Resolution::Unresolved`] carrying the reason.
pub trait ShortcutResolver {
    fn resolve(&self, path: &Path) -> Resolution;

    /// Whether this resolver can ever resolve anything on this machine
    fn is_available(&self) -> bool {
        true
    }
}

/// Validate a target reported by the OS
pub fn check_target(target: &str) -> Resolution {
    let target = target.trim();
    if target.is_empty() {
        return Resolution::Unresolved("shortcut has no target".to_string());
    }
    let path = PathBuf::from(target);
    if is_executable_file(&path) {
        Resolution::Resolved(path)
    } else {
        Resolution::Unresolved(format!("target '{}' is not an existing .exe", target))
    }
}

/// Resolver backed by the platform shell
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShortcutResolver;

impl ShortcutResolver for SystemShortcutResolver {
    fn resolve(&self, path: &Path) -> Resolution {
        if !is_shortcut(path) {
            return Resolution::NotApplicable;
        }

        let resolution = read_target(path);
        if let Resolution::Unresolved(ref reason) = resolution {
            tracing::warn!(path = %path.display(), reason = %reason, "Failed to resolve shortcut");
        }
        resolution
    }

    fn is_available(&self) -> bool {
        cfg!(windows)
    }
}

#[cfg(windows)]
fn read_target(path: &Path) -> Resolution {
    use std::os::windows::process::CommandExt;
    use std::process::{Command, Stdio};

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;

    // Single quotes inside a PowerShell literal are escaped by doubling
    let literal = path.to_string_lossy().replace('\'', "''");
    let script = format!(
        "(New-Object -ComObject WScript.Shell).CreateShortcut('{}').TargetPath",
        literal
    );

    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", &script])
        .stdin(Stdio::null())
        .creation_flags(CREATE_NO_WINDOW)
        .output();

    match output {
        Ok(out) if out.status.success() => check_target(&String::from_utf8_lossy(&out.stdout)),
        Ok(out) => Resolution::Unresolved(format!(
            "shell automation failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )),
        Err(e) => Resolution::Unresolved(format!("shell automation unavailable: {}", e)),
    }
}

#[cfg(not(windows))]
fn read_target(_path: &Path) -> Resolution {
    Resolution::Unresolved("shortcut resolution is not supported on this platform".to_string())
}
