//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the outside world.
//! The `sdd-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ScanResult, TemplateTree};
use crate::error::SddResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sdd_adapters::filesystem::LocalFilesystem` (production)
/// - `sdd_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SddResult<()>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> SddResult<()>;

    /// Append content to an existing file.
    fn append_file(&self, path: &Path, content: &str) -> SddResult<()>;

    fn read_to_string(&self, path: &Path) -> SddResult<String>;

    /// Copy a file byte-for-byte.
    fn copy_file(&self, from: &Path, to: &Path) -> SddResult<()>;

    /// Set or clear the executable bit.
    fn set_permissions(&self, path: &Path, executable: bool) -> SddResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// True when `path` is a directory with no entries.
    fn is_empty_dir(&self, path: &Path) -> SddResult<bool>;
}

/// Port for loading the template corpus.
///
/// Implemented by:
/// - `sdd_adapters::templates::EmbeddedTemplates` (bundled at compile time)
/// - `sdd_adapters::templates::DirectoryTemplates` (a tree on disk)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    fn load(&self) -> SddResult<TemplateTree>;
}

/// Port for inspecting an existing project.
///
/// Never fails: anything unreadable degrades to "not detected".
#[cfg_attr(test, mockall::automock)]
pub trait ProjectScanner: Send + Sync {
    fn scan(&self, root: &Path) -> ScanResult;
}
