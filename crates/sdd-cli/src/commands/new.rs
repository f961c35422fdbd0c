//! New-project mode: `create-sdd-project [NAME] [--yes]`.

use std::path::Path;

use tracing::{info, instrument};

use sdd_adapters::LocalFilesystem;
use sdd_core::application::GenerateService;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IoContext},
    output::{OutputManager, RunSummary},
    wizard::{self, Outcome},
};

/// Execute new-project mode.
///
/// 1. Collect answers (defaults with `--yes`, the wizard otherwise)
/// 2. Refuse a destination that already has content
/// 3. Generate the tree and print the report
#[instrument(skip_all, fields(name = name.as_deref().unwrap_or("")))]
pub fn execute(
    name: Option<String>,
    yes: bool,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let today = super::today();
    let project = if yes {
        let name = name.ok_or(CliError::MissingProjectName)?;
        wizard::new_project_defaults(&name, &config.defaults, today)?
    } else {
        match wizard::new_project(name.as_deref(), &config.defaults, today, &output)? {
            Outcome::Proceed(project) => *project,
            Outcome::Cancelled => {
                output.print("Cancelled.")?;
                return Ok(());
            }
        }
    };

    ensure_empty_destination(&project.project_dir)?;

    output.header(&format!(
        "Creating SDD DevFlow project in {}...",
        project.project_dir.display()
    ))?;
    output.print("")?;

    let service = GenerateService::new(
        super::template_source(&config),
        Box::new(LocalFilesystem::new()),
    );
    let report = service.generate(&project)?;
    info!(written = report.written.len(), "Project created");

    output.report(&RunSummary {
        mode: "new",
        project_name: &project.project_name,
        project_dir: &project.project_dir,
        scan: None,
        report: &report,
    })?;
    Ok(())
}

/// A missing or empty directory is fine; anything else is refused.
fn ensure_empty_destination(dir: &Path) -> CliResult<()> {
    if !dir.exists() {
        return Ok(());
    }
    let mut entries =
        std::fs::read_dir(dir).io_context(|| format!("reading {}", dir.display()))?;
    if entries.next().is_some() {
        return Err(CliError::DestinationNotEmpty {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}
