//! The immutable configuration one materialization run works from.
//!
//! Two default builders exist, one per mode: [`Config::new_project`] for a
//! fresh scaffold and [`Config::retrofit`] for an existing project. The
//! wizard starts from either one through [`ConfigBuilder`] and overrides
//! individual answers.

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::presets::{
    self, AiTools, AutonomyLevel, BackendStack, Branching, FrontendStack, ProjectType,
    DEFAULT_BACKEND_PORT, DEFAULT_FRONTEND_PORT, RETROFIT_AUTONOMY_LEVEL,
};
use crate::domain::scan::ScanResult;

/// Length of sprint 0.
pub const SPRINT_LENGTH_DAYS: u64 = 14;

// ── Stack choices ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendChoice {
    pub preset: &'static BackendStack,
    /// Free-text description, only meaningful for the custom preset.
    pub custom: Option<String>,
}

impl BackendChoice {
    pub fn label(&self) -> &str {
        match (&self.custom, self.preset.is_custom()) {
            (Some(text), true) if !text.trim().is_empty() => text.as_str(),
            _ => self.preset.label,
        }
    }
}

impl Default for BackendChoice {
    fn default() -> Self {
        Self {
            preset: presets::default_backend_stack(),
            custom: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendChoice {
    pub preset: &'static FrontendStack,
    pub custom: Option<String>,
}

impl FrontendChoice {
    pub fn label(&self) -> &str {
        match (&self.custom, self.preset.is_custom()) {
            (Some(text), true) if !text.trim().is_empty() => text.as_str(),
            _ => self.preset.label,
        }
    }
}

impl Default for FrontendChoice {
    fn default() -> Self {
        Self {
            preset: presets::default_frontend_stack(),
            custom: None,
        }
    }
}

// ── Sprint ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SprintWindow {
    pub fn starting(start: NaiveDate) -> Self {
        let end = start
            .checked_add_days(Days::new(SPRINT_LENGTH_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

// ── Retrofit inputs ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataModelFormat {
    Prisma,
    ApiDocs,
    Other,
}

/// A user-provided document describing the data model or API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    /// Relative to the project directory.
    pub path: String,
    pub format: DataModelFormat,
}

impl DataModel {
    /// Where an imported copy lands, `None` for formats referenced in place.
    pub fn import_destination(&self) -> Option<String> {
        match self.format {
            DataModelFormat::Prisma => None,
            DataModelFormat::ApiDocs | DataModelFormat::Other => {
                let name = Path::new(&self.path).file_name()?.to_string_lossy();
                Some(format!("docs/specs/{name}"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrofit {
    pub scan: ScanResult,
    /// Existing OpenAPI document to import as the API spec.
    pub openapi_path: Option<String>,
    pub data_model: Option<DataModel>,
}

// ── Config ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub project_name: String,
    pub project_dir: PathBuf,
    pub description: String,
    pub business_context: String,
    pub project_type: ProjectType,
    pub backend: BackendChoice,
    pub frontend: FrontendChoice,
    pub ai_tools: AiTools,
    pub autonomy: &'static AutonomyLevel,
    pub branching: Branching,
    pub backend_port: u16,
    pub frontend_port: u16,
    pub sprint: SprintWindow,
    /// Present only when adding the workflow to an existing project.
    pub retrofit: Option<Retrofit>,
}

impl Config {
    /// Defaults for a new project: fullstack, default stacks, both tools,
    /// L2 autonomy, GitHub Flow.
    pub fn new_project(
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        ConfigBuilder::new_project(name, dir, today).build()
    }

    /// Defaults for an existing project, inferred from its scan.
    pub fn retrofit(scan: ScanResult, dir: impl Into<PathBuf>, today: NaiveDate) -> Self {
        let project_type = ProjectType::from_detection(scan.backend.detected, scan.frontend.detected);
        let data_model = scan
            .existing_docs
            .prisma_schema_path
            .clone()
            .map(|path| DataModel {
                path,
                format: DataModelFormat::Prisma,
            });

        Self {
            project_name: scan.project_name.clone(),
            project_dir: dir.into(),
            description: scan.description.clone(),
            business_context: String::new(),
            project_type,
            backend: BackendChoice::default(),
            frontend: FrontendChoice::default(),
            ai_tools: AiTools::default(),
            autonomy: presets::autonomy_level(RETROFIT_AUTONOMY_LEVEL)
                .unwrap_or_else(|_| presets::default_autonomy()),
            branching: Branching::infer_from_branch(&scan.git_branch),
            backend_port: scan.backend.port.unwrap_or(DEFAULT_BACKEND_PORT),
            frontend_port: DEFAULT_FRONTEND_PORT,
            sprint: SprintWindow::starting(today),
            retrofit: Some(Retrofit {
                openapi_path: scan.existing_docs.openapi_path.clone(),
                data_model,
                scan,
            }),
        }
    }

    pub fn includes_backend(&self) -> bool {
        self.project_type.includes_backend()
    }

    pub fn includes_frontend(&self) -> bool {
        self.project_type.includes_frontend()
    }

    pub fn is_retrofit(&self) -> bool {
        self.retrofit.is_some()
    }

    pub fn scan(&self) -> Option<&ScanResult> {
        self.retrofit.as_ref().map(|r| &r.scan)
    }

    /// Reminders for chosen presets whose standards still describe the
    /// default stack.
    pub fn advisory_notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.includes_backend() && self.backend.preset.needs_standards_update {
            notes.push(
                "Update ai-specs/specs/backend-standards.mdc with your backend stack patterns."
                    .to_string(),
            );
        }
        if self.includes_frontend() && self.frontend.preset.needs_standards_update {
            notes.push(
                "Update ai-specs/specs/frontend-standards.mdc with your frontend stack patterns."
                    .to_string(),
            );
        }
        notes
    }
}

/// Reject names that cannot serve as a directory name.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let reason = if name.trim().is_empty() {
        Some("name cannot be empty")
    } else if name.starts_with('.') {
        Some("name cannot start with '.'")
    } else if name.contains(['/', '\\']) {
        Some("name cannot contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Overrides on top of one of the default configurations.
///
/// ```
/// use chrono::NaiveDate;
/// use sdd_core::domain::config::ConfigBuilder;
/// use sdd_core::domain::presets::ProjectType;
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let config = ConfigBuilder::new_project("shop", "./shop", today)
///     .project_type(ProjectType::Backend)
///     .backend_stack("express-mongo-mongoose", None)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.backend.preset.orm, Some("Mongoose"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new_project(name: impl Into<String>, dir: impl Into<PathBuf>, today: NaiveDate) -> Self {
        Self {
            config: Config {
                project_name: name.into(),
                project_dir: dir.into(),
                description: String::new(),
                business_context: String::new(),
                project_type: ProjectType::default(),
                backend: BackendChoice::default(),
                frontend: FrontendChoice::default(),
                ai_tools: AiTools::default(),
                autonomy: presets::default_autonomy(),
                branching: Branching::default(),
                backend_port: DEFAULT_BACKEND_PORT,
                frontend_port: DEFAULT_FRONTEND_PORT,
                sprint: SprintWindow::starting(today),
                retrofit: None,
            },
        }
    }

    pub fn retrofit(scan: ScanResult, dir: impl Into<PathBuf>, today: NaiveDate) -> Self {
        Self {
            config: Config::retrofit(scan, dir, today),
        }
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.config.project_name = name.into();
        self
    }

    pub fn project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.project_dir = dir.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.config.description = description.into().trim().to_string();
        self
    }

    pub fn business_context(mut self, context: impl Into<String>) -> Self {
        self.config.business_context = context.into().trim().to_string();
        self
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.config.project_type = project_type;
        self
    }

    pub fn backend_stack(mut self, key: &str, custom: Option<String>) -> Result<Self, DomainError> {
        let preset = presets::backend_stack(key)?;
        self.config.backend = BackendChoice {
            preset,
            custom: custom.filter(|_| preset.is_custom()),
        };
        Ok(self)
    }

    pub fn frontend_stack(mut self, key: &str, custom: Option<String>) -> Result<Self, DomainError> {
        let preset = presets::frontend_stack(key)?;
        self.config.frontend = FrontendChoice {
            preset,
            custom: custom.filter(|_| preset.is_custom()),
        };
        Ok(self)
    }

    pub fn ai_tools(mut self, tools: AiTools) -> Self {
        self.config.ai_tools = tools;
        self
    }

    pub fn autonomy_level(mut self, level: u8) -> Result<Self, DomainError> {
        self.config.autonomy = presets::autonomy_level(level)?;
        Ok(self)
    }

    pub fn branching(mut self, branching: Branching) -> Self {
        self.config.branching = branching;
        self
    }

    pub fn backend_port(mut self, port: u16) -> Self {
        self.config.backend_port = port;
        self
    }

    pub fn frontend_port(mut self, port: u16) -> Self {
        self.config.frontend_port = port;
        self
    }

    /// Ignored outside retrofit mode.
    pub fn openapi_path(mut self, path: Option<String>) -> Self {
        if let Some(retrofit) = self.config.retrofit.as_mut() {
            retrofit.openapi_path = path;
        }
        self
    }

    /// Ignored outside retrofit mode.
    pub fn data_model(mut self, model: Option<DataModel>) -> Self {
        if let Some(retrofit) = self.config.retrofit.as_mut() {
            retrofit.data_model = model;
        }
        self
    }

    /// Read access for wizards that branch on earlier answers.
    pub fn current(&self) -> &Config {
        &self.config
    }

    pub fn build(self) -> Result<Config, DomainError> {
        if self.config.is_retrofit() {
            if self.config.project_name.trim().is_empty() {
                return Err(DomainError::MissingRequiredField {
                    field: "project_name",
                });
            }
        } else {
            validate_project_name(&self.config.project_name)?;
        }
        Ok(self.config)
    }
}
