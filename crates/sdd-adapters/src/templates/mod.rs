//! Template corpus sources.
//!
//! The corpus is a plain file tree: every path is copied into the project,
//! and the stamped ones are rendered on the way. [`EmbeddedTemplates`] ships
//! the tree inside the binary; [`DirectoryTemplates`] reads one from disk so
//! a customised corpus can be tried without rebuilding.

mod directory;
mod embedded;

pub use directory::DirectoryTemplates;
pub use embedded::EmbeddedTemplates;

/// Corpus paths always use `/`, whatever the host separator.
pub(crate) fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
