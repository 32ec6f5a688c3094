//! Path utilities for the URL handler
//!
//! This module contains utilities for working with file paths.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Expand tilde (~) to the user's home directory
///
/// # Arguments
/// * `path` - A path that may start with `~/`
///
/// # Returns
/// The expanded path with `~` replaced by the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };

    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\"))
    };

    match (rest, home::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(stripped), Some(home)) => home.join(stripped),
        _ => path.to_path_buf(),
    }
}

/// Return the path if it names an existing regular file
///
/// Any metadata error (missing, permission denied, broken link) counts as
/// "not there".
pub fn existing_file(path: &Path) -> Option<PathBuf> {
    match path.metadata() {
        Ok(meta) if meta.is_file() => Some(path.to_path_buf()),
        _ => None,
    }
}

/// Filesystem recency of a path: creation time where the platform records
/// it, modification time otherwise
pub fn file_recency(path: &Path) -> Option<SystemTime> {
    let meta = path.metadata().ok()?;
    meta.created().or_else(|_| meta.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde(Path::new("~/test"));
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("test"));
    }

    #[test]
    fn test_expand_tilde_no_tilde() {
        let path = Path::new("/usr/local/bin");
        assert_eq!(expand_tilde(path), path);
    }

    #[test]
    fn test_existing_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("phpstorm64.exe");
        std::fs::write(&file, b"").unwrap();

        assert_eq!(existing_file(&file), Some(file.clone()));
        assert_eq!(existing_file(&dir.path().join("missing.exe")), None);
        // Directories are not executables
        assert_eq!(existing_file(dir.path()), None);
    }

    #[test]
    fn test_file_recency() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a");
        std::fs::write(&file, b"").unwrap();

        assert!(file_recency(&file).is_some());
        assert!(file_recency(&dir.path().join("b")).is_none());
    }
}
