//! Template corpus read from a directory on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use sdd_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::{TemplateFile, TemplateTree},
    error::SddResult,
};

use super::normalize_path;

/// Loads the corpus from `root`, one template file per regular file.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    /// The directory does not need to exist yet; [`TemplateSource::load`]
    /// fails if it is missing when called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplates {
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn load(&self) -> SddResult<TemplateTree> {
        if !self.root.is_dir() {
            return Err(ApplicationError::TemplateSource {
                reason: format!("templates directory not found: {}", self.root.display()),
            }
            .into());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::TemplateSource {
                reason: format!("failed to walk templates directory: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry.path().strip_prefix(&self.root).map_err(|_| {
                ApplicationError::TemplateSource {
                    reason: format!("path escapes template root: {}", entry.path().display()),
                }
            })?;
            let content =
                fs::read_to_string(entry.path()).map_err(|e| ApplicationError::TemplateSource {
                    reason: format!("failed to read '{}': {e}", entry.path().display()),
                })?;
            files.push(TemplateFile::new(
                normalize_path(&rel.to_string_lossy()),
                content,
            ));
        }

        debug!(count = files.len(), "Loaded corpus from disk");
        Ok(files.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_nested_files_with_forward_slashes() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".claude/hooks")).unwrap();
        fs::write(dir.path().join(".claude/hooks/quick-scan.sh"), "#!/bin/sh\n").unwrap();
        fs::write(dir.path().join("AGENTS.md"), "# {{PROJECT_NAME}}\n").unwrap();

        let tree = DirectoryTemplates::new(dir.path()).load().unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(".claude/hooks/quick-scan.sh"), Some("#!/bin/sh\n"));
        assert!(tree.contains("AGENTS.md"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = DirectoryTemplates::new("/definitely/not/here")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("templates directory not found"));
    }
}
