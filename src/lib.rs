//! filegate - Minimal HTTP file-storage gateway
//!
//! Clients upload files into named folders, list folder contents, and
//! delete files by name. Uploaded files are directly retrievable over a
//! static URL. The filesystem under a single storage root is the only
//! source of truth.

pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{FilegateError, Result};
pub use storage::{FolderStore, StoredFile};
pub use web::WebServer;
