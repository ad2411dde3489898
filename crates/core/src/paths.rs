//! Path normalization
//!
//! Turns path text coming from file pickers, the clipboard or drag-and-drop
//! into the canonical form that is stored in groups and compared for
//! duplicates.

use std::path::{Component, Path, PathBuf};

/// Extension a stored entry must carry
pub const EXECUTABLE_EXTENSION: &str = "exe";

/// Extension of shell shortcut files that get resolved before storing
pub const SHORTCUT_EXTENSION: &str = "lnk";

/// Canonicalizes raw path strings.
///
/// Case folding is what makes `C:\Apps\Tool.exe` and `c:\apps\tool.exe` the
/// same entry. It is on by default only where the filesystem is
/// case-insensitive, so that entries on other platforms still point at real
/// files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNormalizer {
    fold_case: bool,
}

impl PathNormalizer {
    pub fn new(fold_case: bool) -> Self {
        Self { fold_case }
    }

    /// Normalizer that always lower-cases
    pub fn folding() -> Self {
        Self::new(true)
    }

    pub fn fold_case(&self) -> bool {
        self.fold_case
    }

    /// Trim, unquote, absolutize and (optionally) lower-case a raw path.
    ///
    /// Never fails; the result may not exist on disk.
    pub fn normalize(&self, raw: &str) -> String {
        let absolute = absolutize(Path::new(strip_input(raw)));
        let text = absolute.to_string_lossy();
        if self.fold_case {
            text.to_lowercase()
        } else {
            text.into_owned()
        }
    }
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::new(cfg!(windows))
    }
}

/// Whether two normalized entries name the same program.
///
/// Always ignores case, whether or not the normalizer folds it.
pub fn same_entry(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Strip surrounding whitespace and one layer of matching quotes
pub fn strip_input(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].trim();
        }
    }
    trimmed
}

/// Make a path absolute against the working directory and collapse `.`/`..`
/// lexically, without touching the filesystem.
fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => {
                tracing::debug!(error = %e, "Working directory unavailable, keeping relative path");
                path.to_path_buf()
            }
        }
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Case-insensitive extension check
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

pub fn is_shortcut(path: &Path) -> bool {
    has_extension(path, SHORTCUT_EXTENSION)
}

/// An existing regular file with the executable extension
pub fn is_executable_file(path: &Path) -> bool {
    has_extension(path, EXECUTABLE_EXTENSION) && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_whitespace_quotes_and_case_normalize_identically() {
        let normalizer = PathNormalizer::folding();
        let base = std::env::temp_dir().join("Apps").join("Tool.exe");
        let plain = base.to_string_lossy().to_string();

        let variants = [
            plain.clone(),
            format!("  {}  ", plain),
            format!("\"{}\"", plain),
            format!("'{}'", plain),
            format!(" \"{}\"\t", plain.to_uppercase()),
            plain.to_lowercase(),
        ];

        let expected = normalizer.normalize(&plain);
        for variant in &variants {
            assert_eq!(normalizer.normalize(variant), expected, "variant {:?}", variant);
        }
        assert_eq!(expected, expected.to_lowercase());
    }

    #[test]
    fn test_relative_path_becomes_absolute() {
        let normalizer = PathNormalizer::new(false);
        let result = normalizer.normalize("some/dir/../tool.exe");
        let path = Path::new(&result);

        assert!(path.is_absolute());
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(path, cwd.join("some").join("tool.exe"));
    }

    #[test]
    fn test_no_folding_keeps_case() {
        let normalizer = PathNormalizer::new(false);
        let raw = std::env::temp_dir().join("MixedCase.exe");
        let result = normalizer.normalize(&raw.to_string_lossy());
        assert!(result.ends_with("MixedCase.exe"));
    }

    #[test]
    fn test_same_entry_ignores_case() {
        assert!(same_entry("/apps/Tool.exe", "/APPS/tool.EXE"));
        assert!(same_entry("c:\\apps\\tool.exe", "c:\\apps\\tool.exe"));
        assert!(!same_entry("/apps/tool.exe", "/apps/tool2.exe"));
    }

    #[test]
    fn test_strip_input() {
        assert_eq!(strip_input("  plain  "), "plain");
        assert_eq!(strip_input("\"quoted\""), "quoted");
        assert_eq!(strip_input("'single'"), "single");
        assert_eq!(strip_input("\"mismatched'"), "\"mismatched'");
        assert_eq!(strip_input("\""), "\"");
        assert_eq!(strip_input(""), "");
    }

    #[test]
    fn test_extension_checks() {
        assert!(is_shortcut(Path::new("Desktop/App.LNK")));
        assert!(!is_shortcut(Path::new("Desktop/app.exe")));
        assert!(has_extension(Path::new("tool.EXE"), EXECUTABLE_EXTENSION));
        assert!(!has_extension(Path::new("tool"), EXECUTABLE_EXTENSION));
    }

    #[test]
    fn test_is_executable_file() {
        let dir = tempdir().unwrap();
        let exe = dir.path().join("tool.exe");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&exe, b"").unwrap();
        std::fs::write(&txt, b"").unwrap();

        assert!(is_executable_file(&exe));
        assert!(!is_executable_file(&txt));
        assert!(!is_executable_file(&dir.path().join("missing.exe")));
        assert!(!is_executable_file(dir.path()));
    }
}
