//! Answers for both modes: defaults when `--yes` skips the questions, and
//! the interactive wizard otherwise.
//!
//! The prompts themselves need the `interactive` feature.  Summaries are
//! plain functions so they can be shown and tested without a terminal.

use std::path::PathBuf;

use chrono::NaiveDate;

use sdd_core::domain::presets::{RETROFIT_AUTONOMY_LEVEL, default_autonomy};
use sdd_core::domain::{Branching, Config, ConfigBuilder, ScanResult};

use crate::config::Defaults;
use crate::error::CliResult;

#[cfg(feature = "interactive")]
mod prompts;

/// What the user decided at the final confirmation.
#[derive(Debug)]
pub enum Outcome {
    Proceed(Box<Config>),
    Cancelled,
}

// ── Defaults (--yes) ─────────────────────────────────────────────────────────

/// A new project in `./<name>` with the configured defaults.
pub fn new_project_defaults(name: &str, defaults: &Defaults, today: NaiveDate) -> CliResult<Config> {
    let level = defaults.autonomy_level.unwrap_or(default_autonomy().level);
    let config = ConfigBuilder::new_project(name, PathBuf::from(".").join(name), today)
        .ai_tools(defaults.ai_tools)
        .branching(defaults.branching)
        .backend_port(defaults.backend_port)
        .autonomy_level(level)?
        .build()?;
    Ok(config)
}

/// Everything the scan detected, with the configured defaults filling gaps.
pub fn retrofit_defaults(
    scan: ScanResult,
    dir: PathBuf,
    defaults: &Defaults,
    today: NaiveDate,
) -> CliResult<Config> {
    let builder = retrofit_builder(scan, dir, defaults, today)?;
    Ok(builder.build()?)
}

fn retrofit_builder(
    scan: ScanResult,
    dir: PathBuf,
    defaults: &Defaults,
    today: NaiveDate,
) -> CliResult<ConfigBuilder> {
    let detected_port = scan.backend.port;
    let branching = match Branching::infer_from_branch(&scan.git_branch) {
        Branching::Gitflow => Branching::Gitflow,
        Branching::GithubFlow => defaults.branching,
    };
    let level = defaults.autonomy_level.unwrap_or(RETROFIT_AUTONOMY_LEVEL);

    let builder = ConfigBuilder::retrofit(scan, dir, today)
        .ai_tools(defaults.ai_tools)
        .branching(branching)
        .autonomy_level(level)?;
    Ok(match detected_port {
        Some(_) => builder,
        None => builder.backend_port(defaults.backend_port),
    })
}

// ── Interactive ──────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
pub fn new_project(
    initial_name: Option<&str>,
    defaults: &Defaults,
    today: NaiveDate,
    output: &crate::output::OutputManager,
) -> CliResult<Outcome> {
    prompts::new_project(initial_name, defaults, today, output)
}

#[cfg(feature = "interactive")]
pub fn retrofit(
    scan: ScanResult,
    dir: PathBuf,
    defaults: &Defaults,
    today: NaiveDate,
    output: &crate::output::OutputManager,
) -> CliResult<Outcome> {
    let builder = retrofit_builder(scan, dir, defaults, today)?;
    prompts::retrofit(builder, output)
}

#[cfg(not(feature = "interactive"))]
pub fn new_project(
    _initial_name: Option<&str>,
    _defaults: &Defaults,
    _today: NaiveDate,
    _output: &crate::output::OutputManager,
) -> CliResult<Outcome> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(not(feature = "interactive"))]
pub fn retrofit(
    _scan: ScanResult,
    _dir: PathBuf,
    _defaults: &Defaults,
    _today: NaiveDate,
    _output: &crate::output::OutputManager,
) -> CliResult<Outcome> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Summaries ────────────────────────────────────────────────────────────────

/// Lines shown before confirming a new project.
pub fn new_project_summary(config: &Config) -> Vec<String> {
    let mut lines = vec![
        format!("Project:     {}", config.project_name),
        format!("Directory:   {}", config.project_dir.display()),
    ];
    if !config.description.is_empty() {
        lines.push(format!("Description: {}", config.description));
    }
    lines.push(format!("Type:        {}", config.project_type.label()));
    if config.includes_backend() {
        lines.push(format!("Backend:     {}", config.backend.label()));
    }
    if config.includes_frontend() {
        lines.push(format!("Frontend:    {}", config.frontend.label()));
    }
    lines.push(format!("AI tools:    {}", config.ai_tools.label()));
    lines.push(format!("Autonomy:    {}", config.autonomy));
    lines.push(format!("Branching:   {}", config.branching.label()));
    if config.includes_backend() {
        lines.push(format!("Port:        {}", config.backend_port));
    }
    lines
}

/// Lines shown before confirming a retrofit.
pub fn retrofit_summary(config: &Config) -> Vec<String> {
    let mut lines = vec![format!("Adding SDD DevFlow to: {}", config.project_name)];

    if let Some(scan) = config.scan() {
        if scan.backend.detected {
            let parts = joined(&[&scan.backend.framework, &scan.backend.orm, &scan.backend.db]);
            lines.push(format!("Backend:      {parts} (detected)"));
        }
        if scan.frontend.detected {
            let parts = joined(&[&scan.frontend.framework, &scan.frontend.styling]);
            lines.push(format!("Frontend:     {parts} (detected)"));
        }
        lines.push(format!("Architecture: {}", scan.src_structure.pattern));
    }
    lines.push(format!("AI tools:     {}", config.ai_tools.label()));
    lines.push(format!("Autonomy:     {}", config.autonomy));
    lines.push(format!("Branching:    {}", config.branching.label()));

    lines.push(String::new());
    lines.push("Files to be created:".into());
    lines.push("  ai-specs/specs/          (standards adapted to your stack)".into());
    lines.push("  docs/project_notes/      (sprint tracker, memory)".into());
    lines.push("  docs/specs/              (API spec, UI components)".into());
    lines.push("  docs/tickets/            (.gitkeep)".into());
    if config.ai_tools.includes_claude() {
        lines.push("  .claude/                 (agents, skills, commands, hooks)".into());
    }
    if config.ai_tools.includes_gemini() {
        lines.push("  .gemini/                 (agents, skills, commands)".into());
    }
    lines.push("  AGENTS.md, CLAUDE.md, GEMINI.md".into());
    lines.push(String::new());
    lines.push("Will NOT modify your existing code or configuration.".into());
    lines.push("Will NOT overwrite existing files.".into());
    lines
}

fn joined(parts: &[&Option<String>]) -> String {
    parts
        .iter()
        .filter_map(|p| p.as_deref())
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdd_core::domain::{AiTools, ProjectType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn new_project_defaults_land_in_a_subdirectory() {
        let config = new_project_defaults("my-app", &Defaults::default(), today()).unwrap();
        assert_eq!(config.project_dir, PathBuf::from("./my-app"));
        assert_eq!(config.autonomy.level, 2);
        assert_eq!(config.backend_port, 3010);
        assert_eq!(config.project_type, ProjectType::Fullstack);
        assert_eq!(config.sprint.start_iso(), "2025-06-02");
    }

    #[test]
    fn configured_defaults_apply_to_new_projects() {
        let defaults = Defaults {
            ai_tools: AiTools::Gemini,
            branching: Branching::Gitflow,
            backend_port: 8080,
            autonomy_level: Some(4),
        };
        let config = new_project_defaults("api", &defaults, today()).unwrap();
        assert_eq!(config.ai_tools, AiTools::Gemini);
        assert_eq!(config.branching, Branching::Gitflow);
        assert_eq!(config.backend_port, 8080);
        assert_eq!(config.autonomy.name, "Full Auto");
    }

    #[test]
    fn invalid_names_are_rejected_before_any_write() {
        assert!(new_project_defaults(".hidden", &Defaults::default(), today()).is_err());
    }

    #[test]
    fn retrofit_defaults_prefer_detected_values() {
        let mut scan = ScanResult::empty("legacy-api");
        scan.backend.detected = true;
        scan.backend.port = Some(4500);
        scan.git_branch = "develop".into();

        let config =
            retrofit_defaults(scan, PathBuf::from("/work/legacy-api"), &Defaults::default(), today())
                .unwrap();
        assert_eq!(config.backend_port, 4500);
        assert_eq!(config.branching, Branching::Gitflow);
        assert_eq!(config.autonomy.level, 1);
        assert_eq!(config.project_type, ProjectType::Backend);
        assert!(config.is_retrofit());
    }

    #[test]
    fn retrofit_defaults_fill_gaps_from_config() {
        let scan = ScanResult::empty("site");
        let defaults = Defaults {
            backend_port: 5000,
            branching: Branching::Gitflow,
            ..Defaults::default()
        };
        let config = retrofit_defaults(scan, PathBuf::from("/work/site"), &defaults, today()).unwrap();
        assert_eq!(config.backend_port, 5000);
        assert_eq!(config.branching, Branching::Gitflow);
    }

    #[test]
    fn new_project_summary_hides_backend_lines_for_frontend_only() {
        let config = ConfigBuilder::new_project("ui", "./ui", today())
            .project_type(ProjectType::Frontend)
            .build()
            .unwrap();
        let lines = new_project_summary(&config);
        assert!(lines.iter().any(|l| l.starts_with("Frontend:")));
        assert!(!lines.iter().any(|l| l.starts_with("Backend:")));
        assert!(!lines.iter().any(|l| l.starts_with("Port:")));
        assert!(lines.iter().any(|l| l.contains("L2 Trusted")));
    }

    #[test]
    fn retrofit_summary_lists_detected_stack_and_tool_dirs() {
        let mut scan = ScanResult::empty("legacy-api");
        scan.backend.detected = true;
        scan.backend.framework = Some("Express".into());
        scan.backend.db = Some("PostgreSQL".into());

        let config = retrofit_defaults(scan, PathBuf::from("/p"), &Defaults::default(), today())
            .unwrap();
        let lines = retrofit_summary(&config);
        assert_eq!(lines[0], "Adding SDD DevFlow to: legacy-api");
        assert!(lines.contains(&"Backend:      Express + PostgreSQL (detected)".to_string()));
        assert!(lines.iter().any(|l| l.contains(".claude/")));
        assert!(lines.iter().any(|l| l.contains(".gemini/")));
    }
}
