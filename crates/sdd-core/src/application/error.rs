//! Application layer errors.
//!
//! These errors represent failures in orchestration, not invalid answers.
//! Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while materializing a project.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A new project must land in an empty or absent directory.
    #[error("Directory {} is not empty.", path.display())]
    DestinationNotEmpty { path: PathBuf },

    /// Retrofit was requested without a scan.
    #[error("Retrofit requires a project scan")]
    MissingScan,

    /// A file the run depends on is absent from the template corpus.
    #[error("Template file missing: {path}")]
    TemplateMissing { path: String },

    /// The template source could not be read.
    #[error("Template source error: {reason}")]
    TemplateSource { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::DestinationNotEmpty { path } => vec![
                format!("Directory already has content: {}", path.display()),
                "Choose a different project name or directory".into(),
                "Use --init inside an existing project instead".into(),
            ],
            Self::MissingScan => vec!["Run with --init from the project root".into()],
            Self::TemplateMissing { .. } | Self::TemplateSource { .. } => vec![
                "Check the [templates] directory in your configuration".into(),
                "Remove it to fall back to the bundled templates".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::MissingScan => ErrorCategory::Internal,
            Self::DestinationNotEmpty { .. } => ErrorCategory::Validation,
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::TemplateSource { .. } => ErrorCategory::Configuration,
        }
    }
}
