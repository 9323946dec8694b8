//! Atomic file writes.
//!
//! All atomic writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! `std::fs::rename` replaces an existing destination on both POSIX and
//! Windows. Temporary names carry a random suffix because several hook
//! processes may write the same state file at once; the last rename wins and
//! the file is never observed half-written.

use crate::error::{Result, RouteError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            RouteError::StateError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RouteError::StateError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary path `.{filename}.{suffix}.tmp` next to the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            RouteError::StateError(format!("invalid file path '{}'", target.display()))
        })?;

    let suffix = Uuid::new_v4().simple().to_string();
    Ok(parent.join(format!(".{}.{}.tmp", filename, &suffix[..8])))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        RouteError::StateError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        RouteError::StateError(format!("failed to write to temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        RouteError::StateError(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.json");

        atomic_write_file(&file_path, "{\"tasks\":[]}").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{\"tasks\":[]}");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.json");
        fs::write(&file_path, "original content").unwrap();

        atomic_write(&file_path, b"new content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join(".taskroute").join("state.json");

        atomic_write(&file_path, b"nested content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "nested content");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.json");

        atomic_write(&file_path, b"content").unwrap();
        atomic_write(&file_path, b"content again").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("tasks.json")]);
    }

    #[test]
    fn test_generate_temp_path_is_unique_sibling() {
        let target = Path::new("/some/path/tasks.json");
        let first = generate_temp_path(target).unwrap();
        let second = generate_temp_path(target).unwrap();

        assert_eq!(first.parent().unwrap(), Path::new("/some/path"));
        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".tasks.json."));
        assert!(name.ends_with(".tmp"));
        assert_ne!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_concurrent_writes_to_same_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.json");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let path = file_path.clone();
                std::thread::spawn(move || {
                    atomic_write_file(&path, &format!("writer {}", i)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(&file_path).unwrap();
        assert!(content.starts_with("writer "));
    }
}
