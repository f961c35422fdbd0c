//! Generate Service - scaffolds a new project from the template corpus.
//!
//! 1. Reject a destination that already has content
//! 2. Plan every file the configuration keeps, rendering the stamped ones
//! 3. Write the plan and report what happened

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateSource},
        report::MaterializeReport,
        services::materialize::{self, Existing},
    },
    domain::{
        Config, ProjectStructure, ProjectType, TemplateTree, context,
        template::{self, CLAUDE_DIR, CLAUDE_FILE, GEMINI_DIR, GEMINI_FILE},
    },
    error::SddResult,
};

/// Creates a new project directory.
pub struct GenerateService {
    templates: Box<dyn TemplateSource>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    pub fn new(templates: Box<dyn TemplateSource>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            templates,
            filesystem,
        }
    }

    #[instrument(
        skip_all,
        fields(
            project = %config.project_name,
            dir = %config.project_dir.display(),
            project_type = %config.project_type,
        )
    )]
    pub fn generate(&self, config: &Config) -> SddResult<MaterializeReport> {
        let root = &config.project_dir;
        if self.filesystem.exists(root) && !self.filesystem.is_empty_dir(root)? {
            return Err(ApplicationError::DestinationNotEmpty { path: root.clone() }.into());
        }

        let tree = self.templates.load()?;
        info!(files = tree.len(), "Template corpus loaded");

        let mut report = MaterializeReport::new();
        report.step("Copying template files");
        let structure = plan(&tree, config)?;

        report.step(format!("Configuring project: {}", config.project_name));
        if config.includes_backend() {
            report.step(format!("Setting backend: {}", config.backend.label()));
        }
        if config.includes_frontend() {
            report.step(format!("Setting frontend: {}", config.frontend.label()));
        }
        report.step(format!(
            "Setting autonomy level: L{} ({})",
            config.autonomy.level, config.autonomy.name
        ));
        report.step(format!("Setting branching: {}", config.branching));
        report.step("Setting sprint dates to today");
        match config.project_type {
            ProjectType::Backend => report.step("Removing frontend agents (backend only)"),
            ProjectType::Frontend => report.step("Removing backend agents (frontend only)"),
            ProjectType::Fullstack => {}
        }
        if !config.ai_tools.includes_gemini() {
            report.step("Removing Gemini config (Claude only)");
        } else if !config.ai_tools.includes_claude() {
            report.step("Removing Claude config (Gemini only)");
        }

        materialize::write_structure(
            self.filesystem.as_ref(),
            &structure,
            Existing::Overwrite,
            &mut report,
        )?;

        report.notes = config.advisory_notes();
        report.next_steps = vec![
            format!("cd {}", config.project_dir.display()),
            "git init && git add -A && git commit -m \"chore: initialize SDD DevFlow project\""
                .to_string(),
            "# Open in your AI coding tool and run: init sprint 0".to_string(),
        ];

        info!(written = report.written.len(), "Project generated");
        Ok(report)
    }
}

/// Every file a new project of this configuration receives.
fn plan(tree: &TemplateTree, config: &Config) -> SddResult<ProjectStructure> {
    let ctx = context::new_project(config);
    let mut structure = ProjectStructure::new(&config.project_dir);

    for (path, _) in tree.iter() {
        if !keeps(path, config) {
            continue;
        }
        structure.add_file(path, materialize::render_file(tree, path, &ctx)?);
    }
    Ok(structure)
}

fn keeps(path: &str, config: &Config) -> bool {
    let tools = config.ai_tools;
    if (path.starts_with(CLAUDE_DIR) || path == CLAUDE_FILE) && !tools.includes_claude() {
        return false;
    }
    if (path.starts_with(GEMINI_DIR) || path == GEMINI_FILE) && !tools.includes_gemini() {
        return false;
    }
    if template::is_excluded_agent(path, config.project_type) {
        return false;
    }
    match path {
        template::API_SPEC => config.includes_backend(),
        template::UI_COMPONENTS => config.includes_frontend(),
        _ => true,
    }
}
