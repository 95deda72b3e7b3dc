//! Archive access.
//!
//! An [`Archive`] is a named set of entries with byte content. The shipped
//! [`DirArchive`] reads an exploded archive: a directory tree whose files are
//! the entries, named by their `/`-separated path relative to the root.

use crate::error::{AbiCmpError, ArchiveErrorKind, ErrorContext, Result};
use std::path::{Path, PathBuf};

/// A named collection of entries.
pub trait Archive: Send + Sync {
    /// Display name, used in reports and defect locations
    fn name(&self) -> &str;

    /// All entry names, sorted
    fn entry_names(&self) -> Result<Vec<String>>;

    /// Content of one entry
    fn read_entry(&self, name: &str) -> Result<Vec<u8>>;
}

/// An exploded archive on disk.
#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
    name: String,
}

impl DirArchive {
    /// Open `root`, which must be an existing directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(AbiCmpError::archive(
                "opening archive",
                ArchiveErrorKind::NotFound(root.to_path_buf()),
            ));
        }
        if !root.is_dir() {
            return Err(AbiCmpError::archive(
                "opening archive",
                ArchiveErrorKind::NotADirectory(root.to_path_buf()),
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
            name: root.display().to_string(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collect(&self, dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
        let entries = std::fs::read_dir(dir).map_err(|e| AbiCmpError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| AbiCmpError::io(dir, e))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let name = if prefix.is_empty() {
                file_name
            } else {
                format!("{prefix}/{file_name}")
            };
            let file_type = entry.file_type().map_err(|e| AbiCmpError::io(entry.path(), e))?;
            if file_type.is_dir() {
                self.collect(&entry.path(), &name, out)?;
            } else {
                out.push(name);
            }
        }
        Ok(())
    }
}

impl Archive for DirArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn entry_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        self.collect(&self.root, "", &mut names)
            .with_context(|| format!("listing {}", self.name))?;
        names.sort();
        Ok(names)
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        if name.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(AbiCmpError::archive(
                self.name.clone(),
                ArchiveErrorKind::MissingEntry(name.to_string()),
            ));
        }
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(AbiCmpError::archive(
                self.name.clone(),
                ArchiveErrorKind::MissingEntry(name.to_string()),
            ));
        }
        std::fs::read(&path).map_err(|e| AbiCmpError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_sorted_and_relative() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("a/b")).expect("mkdir");
        std::fs::write(dir.path().join("a/b/C.class.json"), "{}").expect("write");
        std::fs::write(dir.path().join("A.class.json"), "{}").expect("write");

        let archive = DirArchive::open(dir.path()).expect("open");
        assert_eq!(
            archive.entry_names().expect("list"),
            vec!["A.class.json", "a/b/C.class.json"]
        );
        assert_eq!(archive.read_entry("a/b/C.class.json").expect("read"), b"{}");
    }

    #[test]
    fn test_open_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = DirArchive::open(dir.path().join("nope")).expect_err("missing");
        assert!(missing.cause().contains("Archive not found"));

        let file = dir.path().join("f.jar");
        std::fs::write(&file, "x").expect("write");
        let not_dir = DirArchive::open(&file).expect_err("file");
        assert!(not_dir.cause().contains("Not a directory archive"));
    }

    #[test]
    fn test_read_entry_rejects_escapes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let archive = DirArchive::open(dir.path()).expect("open");
        assert!(archive.read_entry("../secret").is_err());
        assert!(archive.read_entry("absent.class.json").is_err());
    }
}
