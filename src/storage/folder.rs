//! Filesystem-backed folder store.
//!
//! Maps a folder name to a directory of files under a single storage
//! root. The directory tree is the only source of truth; no index or
//! manifest is kept.
//!
//! ```text
//! {root}/
//! ├── ProjectA/
//! │   ├── 1712345678901_photo.png
//! │   └── 1712345679042_notes.txt
//! └── ProjectB/
//!     └── 1712345680115_report.pdf
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::name::validate_name;
use crate::Result;

/// A file entry as observed in a folder listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// On-disk file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Folder-scoped file storage rooted at a single base directory.
#[derive(Debug, Clone)]
pub struct FolderStore {
    /// Base directory; every folder is a direct child of this path.
    root: PathBuf,
}

impl FolderStore {
    /// Create a new FolderStore with the given root directory.
    ///
    /// The root directory will be created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Get the storage root of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a folder name to its directory path.
    ///
    /// The name is validated as a single path segment first, so the
    /// result is always contained within the storage root. The directory
    /// is not created or checked for existence here.
    pub fn resolve(&self, folder: &str) -> Result<PathBuf> {
        validate_name(folder)?;
        Ok(self.root.join(folder))
    }

    /// Resolve a (folder, file) pair to a file path, validating both names.
    fn resolve_file(&self, folder: &str, file: &str) -> Result<PathBuf> {
        validate_name(file)?;
        Ok(self.resolve(folder)?.join(file))
    }

    /// Create a folder directory if absent. Idempotent.
    pub fn ensure_exists(&self, folder: &str) -> Result<PathBuf> {
        let dir = self.resolve(folder)?;
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Write file content into a folder under the given name.
    ///
    /// Creates the folder on demand.
    pub fn save(&self, folder: &str, name: &str, content: &[u8]) -> Result<()> {
        let path = self.resolve_file(folder, name)?;
        self.ensure_exists(folder)?;
        fs::write(&path, content)?;

        Ok(())
    }

    /// Check whether a file exists in a folder.
    pub fn contains(&self, folder: &str, name: &str) -> Result<bool> {
        Ok(self.resolve_file(folder, name)?.is_file())
    }

    /// List the files in a folder.
    ///
    /// A folder that doesn't exist yields an empty listing, not an
    /// error. Entries come back in the filesystem's native directory
    /// order; subdirectories are skipped.
    pub fn list(&self, folder: &str) -> Result<Vec<StoredFile>> {
        let dir = self.resolve(folder)?;

        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                // Non-UTF-8 names cannot appear in our JSON responses
                continue;
            };

            files.push(StoredFile {
                name,
                size: metadata.len(),
            });
        }

        Ok(files)
    }

    /// Delete a file from a folder.
    ///
    /// Returns `true` if the file was deleted, `false` if it didn't
    /// exist. Never removes directories.
    pub fn delete(&self, folder: &str, name: &str) -> Result<bool> {
        let path = self.resolve_file(folder, name)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
