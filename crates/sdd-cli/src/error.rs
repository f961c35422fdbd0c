//! Errors surfaced by `create-sdd-project`.
//!
//! Each variant carries its own suggestions. Every failure exits with
//! status 1; the category only decides the log severity.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use sdd_core::domain::DomainError;
use sdd_core::error::SddError;

pub use sdd_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // ── Argument validation ────────────────────────────────────────────────
    #[error("Project name required with --yes flag.")]
    MissingProjectName,

    #[error("Directory {} is not empty.", path.display())]
    DestinationNotEmpty { path: PathBuf },

    #[error("No package.json found in current directory.")]
    NoPackageJson,

    #[error("ai-specs/ directory already exists.")]
    AlreadyInstalled,

    #[error("Cannot specify a project name with --init.")]
    NameWithInit,

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file or environment override could not be used.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `sdd-core` or one of its adapters.
    #[error("{0}")]
    Core(#[from] SddError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The wizard could not talk to the terminal.
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// Interactive mode in a build without the `interactive` feature.
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingProjectName => vec![
                "Usage: create-sdd-project <project-name> --yes".into(),
                "Or drop --yes to answer the questions interactively".into(),
            ],

            Self::DestinationNotEmpty { .. } => vec![
                "Please choose a different directory or remove existing files.".into(),
                "To add SDD DevFlow to an existing project, run: create-sdd-project --init"
                    .into(),
            ],

            Self::NoPackageJson => vec![
                "The --init flag must be run from inside an existing project.".into(),
                "To create a new project, run: create-sdd-project <project-name>".into(),
            ],

            Self::AlreadyInstalled => {
                vec!["SDD DevFlow appears to already be installed in this project.".into()]
            }

            Self::NameWithInit => vec!["Usage: create-sdd-project --init".into()],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Check SDD_* environment variables".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],

            Self::Prompt { .. } => vec![
                "The wizard needs an interactive terminal".into(),
                "Pass --yes to use the defaults without prompting".into(),
            ],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{feature}' feature is not available in this build"),
                "Pass --yes to use the defaults without prompting".into(),
                format!("Or reinstall with it enabled: cargo install sdd-cli --features {feature}"),
            ],
        }
    }

    /// Get the error category for styling and log severity.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingProjectName
            | Self::DestinationNotEmpty { .. }
            | Self::NoPackageJson
            | Self::AlreadyInstalled
            | Self::NameWithInit
            | Self::Prompt { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Everything printed on stderr for this error: the message, the cause
    /// chain when `verbose`, suggestions, and otherwise a hint about `-v`.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |style: Style| if color { style } else { Style::new() };
        let alert = paint(Style::new().red().bold());
        let dim = paint(Style::new().dimmed());
        let mark = if color { "✗ " } else { "" };

        let mut out = format!(
            "\n{mark}{} {}\n",
            "Error:".style(alert),
            self.style(paint(Style::new().red()))
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!("  {} {err}\n", "Caused by:".style(dim)));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                "Suggestions:".style(paint(Style::new().yellow().bold()))
            ));
            for line in suggestions {
                out.push_str(&format!("  {line}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                "Use -v / --verbose for more details.".style(dim)
            ));
        }
        out
    }

    /// User mistakes are warnings; configuration and internal failures are errors.
    pub fn log(&self) {
        let category = self.category();
        let cause = self.source().map(|e| e.to_string());
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, ?cause, "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, ?cause, "{self}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

/// Attach "what were we doing" to an I/O failure.
pub trait IoContext<T> {
    fn io_context<S: Into<String>>(self, doing: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<S: Into<String>>(self, doing: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|source| CliError::IoError {
            message: doing().into(),
            source,
        })
    }
}
