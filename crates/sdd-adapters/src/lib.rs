//! Infrastructure adapters for create-sdd-project.
//!
//! This crate implements the ports defined in `sdd_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod scanner;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use scanner::DiskScanner;
pub use templates::{DirectoryTemplates, EmbeddedTemplates};
