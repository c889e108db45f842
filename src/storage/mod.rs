//! File storage module for filegate.
//!
//! This module provides the folder-scoped storage layer:
//! - Folder resolution with name sanitization
//! - File enumeration and deletion
//! - Timestamp-prefixed name generation for uploads

mod folder;
mod name;

pub use folder::{FolderStore, StoredFile};
pub use name::{generated_name, now_millis, validate_name, MAX_NAME_LENGTH};
