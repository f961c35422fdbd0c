//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. `SDD_`-prefixed environment variables, `__` between keys
//!    (`SDD_DEFAULTS__BACKEND_PORT=4000`)
//! 2. Config file: `--config FILE`, else the platform config directory
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use sdd_core::domain::presets::{self, AiTools, Branching, DEFAULT_BACKEND_PORT};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used when the wizard is skipped, and pre-selected in it.
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub ai_tools: AiTools,
    pub branching: Branching,
    pub backend_port: u16,
    /// Unset means the mode's own default: L2 for new projects, L1 for
    /// retrofits.
    pub autonomy_level: Option<u8>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            ai_tools: AiTools::default(),
            branching: Branching::default(),
            backend_port: DEFAULT_BACKEND_PORT,
            autonomy_level: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// On-disk template tree used instead of the bundled one.
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix("SDD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = settings
            .try_deserialize()
            .context("Invalid configuration value")?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "Configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(level) = self.defaults.autonomy_level {
            presets::autonomy_level(level).context("Invalid defaults.autonomy_level")?;
        }
        if self.defaults.backend_port == 0 {
            anyhow::bail!("Invalid defaults.backend_port: 0");
        }
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.sdd-devflow.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "sdd-devflow", "create-sdd-project")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".sdd-devflow.toml"))
    }
}
