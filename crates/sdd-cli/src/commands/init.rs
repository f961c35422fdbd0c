//! Retrofit mode: `create-sdd-project --init [--yes]`.

use std::path::Path;

use tracing::{debug, info, instrument};

use sdd_adapters::{DiskScanner, LocalFilesystem};
use sdd_core::application::RetrofitService;
use sdd_core::application::ports::ProjectScanner;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IoContext},
    output::{OutputManager, RunSummary},
    wizard::{self, Outcome},
};

/// Execute retrofit mode in the current directory.
#[instrument(skip_all)]
pub fn execute(
    name: Option<String>,
    yes: bool,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let cwd = std::env::current_dir().io_context(|| "reading the working directory")?;
    check_preconditions(&cwd, name.as_deref())?;

    let spinner = output.spinner("Scanning project...");
    let scan = DiskScanner::new().scan(&cwd);
    spinner.finish_and_clear();
    debug!(?scan, "Scan finished");

    let today = super::today();
    let project = if yes {
        wizard::retrofit_defaults(scan, cwd, &config.defaults, today)?
    } else {
        match wizard::retrofit(scan, cwd, &config.defaults, today, &output)? {
            Outcome::Proceed(project) => *project,
            Outcome::Cancelled => {
                output.print("Cancelled.")?;
                return Ok(());
            }
        }
    };

    output.header(&format!("Adding SDD DevFlow to {}...", project.project_name))?;
    output.print("")?;

    let service = RetrofitService::new(
        super::template_source(&config),
        Box::new(LocalFilesystem::new()),
    );
    let report = service.generate_init(&project)?;
    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Workflow added"
    );

    output.report(&RunSummary {
        mode: "init",
        project_name: &project.project_name,
        project_dir: &project.project_dir,
        scan: project.scan(),
        report: &report,
    })?;
    Ok(())
}

/// Checked in order: a manifest, no previous install, no stray name.
fn check_preconditions(dir: &Path, name: Option<&str>) -> CliResult<()> {
    if !dir.join("package.json").is_file() {
        return Err(CliError::NoPackageJson);
    }
    if dir.join("ai-specs").exists() {
        return Err(CliError::AlreadyInstalled);
    }
    if name.is_some() {
        return Err(CliError::NameWithInit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn manifest_is_checked_first() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("ai-specs")).unwrap();
        assert!(matches!(
            check_preconditions(dir.path(), Some("x")),
            Err(CliError::NoPackageJson)
        ));
    }

    #[test]
    fn existing_install_is_checked_before_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("ai-specs")).unwrap();
        assert!(matches!(
            check_preconditions(dir.path(), Some("x")),
            Err(CliError::AlreadyInstalled)
        ));
    }

    #[test]
    fn name_is_rejected_last() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert!(matches!(
            check_preconditions(dir.path(), Some("x")),
            Err(CliError::NameWithInit)
        ));
        assert!(check_preconditions(dir.path(), None).is_ok());
    }
}
