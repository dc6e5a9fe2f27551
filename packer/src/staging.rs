//! Ephemeral staging directory management.
//!
//! The staging directory at `staging_root/project_name` is exclusively
//! owned by one packing operation for its duration: recreated empty on
//! acquisition (discarding residue from any prior failed run), populated
//! with validated entries, and removed when the guard drops — on success
//! and on every error path alike. Removal failures are logged and
//! swallowed; cleanup must never mask the packing outcome.

use crate::error::Result;
use crate::file_map::FileMap;
use crate::project_name::ProjectName;
use crate::sanitize::{ensure_within, sanitize_relative_path};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Create a directory and all missing parents; idempotent.
///
/// # Errors
///
/// Returns [`crate::error::PackError::Io`] if creation fails.
pub fn ensure_dir(path: &Utf8Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// RAII guard over the ephemeral staging directory.
///
/// Not safe for concurrent acquisitions sharing the same staging root and
/// project name; one caller's recreation step deletes another's in-flight
/// files. Callers needing concurrency must use distinct staging roots.
#[derive(Debug)]
pub struct StagingDir {
    path: Utf8PathBuf,
    keep: bool,
}

impl StagingDir {
    /// Recreate `staging_root/project_name` fresh and empty.
    ///
    /// Any pre-existing directory at that path is removed first, so no
    /// residue from a previous invocation leaks into this one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PackError::Io`] if removal or creation
    /// fails.
    pub fn recreate(staging_root: &Utf8Path, name: &ProjectName) -> Result<Self> {
        let path = staging_root.join(name.as_str());
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;
        Ok(Self { path, keep: false })
    }

    /// Path of the staged project directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Consume the guard without removing the directory.
    ///
    /// Escape hatch for inspecting the staged tree after a run; the caller
    /// takes over responsibility for removal.
    #[must_use]
    pub fn into_path(mut self) -> Utf8PathBuf {
        self.keep = true;
        self.path.clone()
    }

    /// Materialize every file-map entry under the staging directory.
    ///
    /// Each key is sanitized, containment-checked against the staging
    /// directory, and written as UTF-8 text with any missing parent
    /// directories created. Writing overwrites an existing target, which
    /// cannot occur from a clean staging directory but is safe regardless.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PackError::UnsafePath`] for a key that is
    /// absolute, traverses upward, or escapes the staging directory, or
    /// [`crate::error::PackError::Io`] on write failure.
    pub fn write_entries(&self, file_map: &FileMap) -> Result<()> {
        for (relative_path, content) in file_map.iter() {
            let safe_relative = sanitize_relative_path(relative_path)?;
            let target = self.path.join(&safe_relative);
            ensure_within(&self.path, &target)?;

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content)?;
        }
        Ok(())
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(error) = fs::remove_dir_all(&self.path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                log::warn!("failed to remove staging directory {}: {error}", self.path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_map::FileMapInput;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp path")
    }

    fn demo_name() -> ProjectName {
        ProjectName::try_from("demo").expect("valid name")
    }

    fn map_of(entries: &[(&str, &str)]) -> FileMap {
        let mapping: BTreeMap<String, String> = entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        FileMap::parse(FileMapInput::from(mapping)).expect("valid map")
    }

    #[test]
    fn recreate_discards_previous_contents() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let stale = root.join("demo/stale.txt");
        fs::create_dir_all(stale.parent().expect("parent")).expect("mkdir");
        fs::write(&stale, "leftover").expect("write stale");

        let staging = StagingDir::recreate(&root, &demo_name()).expect("recreate");
        assert!(staging.path().exists());
        assert!(!stale.exists());
    }

    #[test]
    fn write_entries_creates_nested_files() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let staging = StagingDir::recreate(&root, &demo_name()).expect("recreate");

        let map = map_of(&[("src/main.py", "print('hello')\n"), ("README.md", "# Demo\n")]);
        staging.write_entries(&map).expect("write entries");

        let written = fs::read_to_string(staging.path().join("src/main.py")).expect("read");
        assert_eq!(written, "print('hello')\n");
        assert!(staging.path().join("README.md").exists());
    }

    #[test]
    fn write_entries_rejects_traversal_key() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let staging = StagingDir::recreate(&root, &demo_name()).expect("recreate");

        let map = map_of(&[("../evil.txt", "boom")]);
        let result = staging.write_entries(&map);
        assert!(result.is_err());
        assert!(!root.join("evil.txt").exists());
    }

    #[test]
    fn drop_removes_staging_directory() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let staged_path = {
            let staging = StagingDir::recreate(&root, &demo_name()).expect("recreate");
            staging
                .write_entries(&map_of(&[("a.txt", "A\n")]))
                .expect("write");
            staging.path().to_owned()
        };
        assert!(!staged_path.exists());
    }

    #[test]
    fn into_path_keeps_the_directory() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let staging = StagingDir::recreate(&root, &demo_name()).expect("recreate");
        staging
            .write_entries(&map_of(&[("a.txt", "A\n")]))
            .expect("write");

        let kept_path = staging.into_path();
        assert!(kept_path.exists());
        assert!(kept_path.join("a.txt").exists());
    }

    #[test]
    fn drop_tolerates_already_removed_directory() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let staging = StagingDir::recreate(&root, &demo_name()).expect("recreate");
        fs::remove_dir_all(staging.path()).expect("external removal");
        // Dropping must not panic even though the directory is gone.
        drop(staging);
    }
}
