//! Retrofit Service - adds the workflow to an existing project.
//!
//! Every write is guarded: a path that already exists is reported as skipped
//! and its bytes stay untouched. Instruction files the project already has
//! are never rewritten and no file is ever deleted.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateSource},
        report::MaterializeReport,
        services::materialize::{self, Existing},
    },
    domain::{
        Config, ProjectStructure, RenderContext, Retrofit, TemplateTree, context,
        template::{
            self, API_SPEC, BACKEND_STANDARDS, CLAUDE_DIR, CLAUDE_FILE, ENV_EXAMPLE,
            FRONTEND_STANDARDS, GEMINI_DIR, GEMINI_FILE, GITIGNORE, TICKETS_KEEP, UI_COMPONENTS,
        },
    },
    error::SddResult,
};

const GITIGNORE_MARKER: &str = "SDD DevFlow";
const GITIGNORE_ENTRIES: &str = "\n# SDD DevFlow\ndocs/tickets/*.md\n!docs/tickets/.gitkeep\n";

const PLAIN_STANDARDS: &[&str] = &[
    "ai-specs/specs/base-standards.mdc",
    "ai-specs/specs/documentation-standards.mdc",
];
const KEY_FACTS: &str = "docs/project_notes/key_facts.md";
const SPRINT_TRACKER: &str = "docs/project_notes/sprint-0-tracker.md";
const MEMORY_NOTES: &[&str] = &[
    "docs/project_notes/bugs.md",
    "docs/project_notes/decisions.md",
];

/// Installs the workflow into an existing project directory.
pub struct RetrofitService {
    templates: Box<dyn TemplateSource>,
    filesystem: Box<dyn Filesystem>,
}

impl RetrofitService {
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
    pub fn generate_init(&self, config: &Config) -> SddResult<MaterializeReport> {
        let retrofit = config.retrofit.as_ref().ok_or(ApplicationError::MissingScan)?;
        let tree = self.templates.load()?;
        info!(files = tree.len(), "Template corpus loaded");

        let ctx = context::retrofit(config, retrofit);
        let mut report = MaterializeReport::new();
        let structure = self.plan(&tree, config, retrofit, &ctx, &mut report)?;

        materialize::write_structure(
            self.filesystem.as_ref(),
            &structure,
            Existing::Skip,
            &mut report,
        )?;
        self.ensure_tickets_dir(&config.project_dir)?;
        self.append_gitignore(&config.project_dir, &mut report)?;

        report.notes = notes(config, retrofit);
        report.next_steps = vec![
            "git add -A && git commit -m \"chore: add SDD DevFlow to existing project\""
                .to_string(),
            "# Open in your AI coding tool and run: init sprint 0".to_string(),
        ];

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Retrofit complete"
        );
        Ok(report)
    }

    fn plan(
        &self,
        tree: &TemplateTree,
        config: &Config,
        retrofit: &Retrofit,
        ctx: &RenderContext,
        report: &mut MaterializeReport,
    ) -> SddResult<ProjectStructure> {
        let root = &config.project_dir;
        let mut structure = ProjectStructure::new(root);
        let add = |structure: &mut ProjectStructure, path: &str| -> SddResult<()> {
            structure.add_file(path, materialize::render_file(tree, path, ctx)?);
            Ok(())
        };

        if config.ai_tools.includes_claude() {
            report.step("Installing Claude Code config (agents, skills, commands, hooks)");
            for (path, _) in tree.under(CLAUDE_DIR) {
                if !template::is_excluded_agent(path, config.project_type) {
                    add(&mut structure, path)?;
                }
            }
            add(&mut structure, CLAUDE_FILE)?;
        }
        if config.ai_tools.includes_gemini() {
            report.step("Installing Gemini config (agents, skills, commands)");
            for (path, _) in tree.under(GEMINI_DIR) {
                if !template::is_excluded_agent(path, config.project_type) {
                    add(&mut structure, path)?;
                }
            }
            add(&mut structure, GEMINI_FILE)?;
        }

        report.step("Creating ai-specs/specs/ (4 standards files)");
        for &path in PLAIN_STANDARDS {
            add(&mut structure, path)?;
        }
        if config.includes_backend() {
            add(&mut structure, BACKEND_STANDARDS)?;
        }
        if config.includes_frontend() {
            add(&mut structure, FRONTEND_STANDARDS)?;
        }

        report.step("Creating docs/project_notes/ (sprint tracker, memory)");
        add(&mut structure, KEY_FACTS)?;
        for &path in MEMORY_NOTES {
            add(&mut structure, path)?;
        }
        add(&mut structure, SPRINT_TRACKER)?;
        if config.includes_frontend() {
            add(&mut structure, UI_COMPONENTS)?;
        }

        if let Some(openapi) = &retrofit.openapi_path {
            report.step(format!("Importing OpenAPI spec → {API_SPEC}"));
            structure.add_copy(API_SPEC, root.join(openapi));
        } else if config.includes_backend() {
            add(&mut structure, API_SPEC)?;
        }
        if let Some(model) = &retrofit.data_model {
            if let Some(dest) = model.import_destination() {
                if structure.contains(&dest) {
                    // The workflow already plans a file there.
                    debug!(%dest, "Data model import collides with a planned file");
                    report.skip(dest, "already provided by the workflow, data model not imported");
                } else {
                    report.step("Importing data model → docs/specs/");
                    structure.add_copy(dest, root.join(&model.path));
                }
            }
        }

        report.step("Creating AGENTS.md");
        add(&mut structure, "AGENTS.md")?;

        report.step(format!(
            "Setting autonomy level: L{} ({})",
            config.autonomy.level, config.autonomy.name
        ));

        add(&mut structure, ENV_EXAMPLE)?;
        Ok(structure)
    }

    fn ensure_tickets_dir(&self, root: &Path) -> SddResult<()> {
        let keep = root.join(TICKETS_KEEP);
        if self.filesystem.exists(&keep) {
            return Ok(());
        }
        if let Some(parent) = keep.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&keep, "")
    }

    fn append_gitignore(&self, root: &Path, report: &mut MaterializeReport) -> SddResult<()> {
        let path = root.join(GITIGNORE);
        if !self.filesystem.exists(&path) {
            report.skip(GITIGNORE, "not found, add SDD entries manually");
            return Ok(());
        }
        let current = self.filesystem.read_to_string(&path)?;
        if current.contains(GITIGNORE_MARKER) {
            debug!("SDD entries already present in .gitignore");
            return Ok(());
        }
        self.filesystem.append_file(&path, GITIGNORE_ENTRIES)?;
        report.step("Appended SDD entries to .gitignore");
        Ok(())
    }
}

fn notes(config: &Config, retrofit: &Retrofit) -> Vec<String> {
    let scan = &retrofit.scan;
    let mut notes = Vec::new();

    for (included, path) in [
        (config.includes_backend(), BACKEND_STANDARDS),
        (config.includes_frontend(), FRONTEND_STANDARDS),
    ] {
        if included {
            notes.push(format!(
                "Review {path} before your first sprint: its architecture section was adapted from the scan."
            ));
        }
    }
    if !notes.is_empty() {
        notes.push(
            "These files were generated from project analysis. Adjust patterns and conventions to match your team's actual practices."
                .to_string(),
        );
    }

    if scan.tests.estimated_coverage.is_weak() {
        let found = match scan.tests.test_files {
            0 => "No test files detected.".to_string(),
            n => format!("Test coverage appears low ({n} test files found)."),
        };
        notes.push(format!(
            "{found} Consider starting Sprint 0 with retrofit testing tasks."
        ));
    }

    if let Some(schema) = &scan.existing_docs.prisma_schema_path {
        if retrofit.openapi_path.is_none() {
            notes.push(format!(
                "Prisma schema found at {schema}, referenced in {KEY_FACTS}"
            ));
        }
    }
    notes
}
