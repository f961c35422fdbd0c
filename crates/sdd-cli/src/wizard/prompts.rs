//! Terminal prompts for both wizards, built on `dialoguer`.

use std::path::PathBuf;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use sdd_core::domain::config::validate_project_name;
use sdd_core::domain::presets::{AUTONOMY_LEVELS, BACKEND_STACKS, FRONTEND_STACKS};
use sdd_core::domain::{
    AiTools, Branching, ConfigBuilder, DataModel, DataModelFormat, ProjectType,
};

use super::{Outcome, new_project_summary, retrofit_summary};
use crate::config::Defaults;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Prompt {
            message: err.to_string(),
        }
    }
}

/// Ask every new-project question, then confirm.
pub(super) fn new_project(
    initial_name: Option<&str>,
    defaults: &Defaults,
    today: NaiveDate,
    output: &OutputManager,
) -> CliResult<Outcome> {
    let theme = ColorfulTheme::default();
    output.header("Create SDD DevFlow Project")?;
    output.print("Spec-Driven Development workflow for AI-assisted coding.")?;
    output.print("")?;

    let name: String = Input::with_theme(&theme)
        .with_prompt("Project name")
        .with_initial_text(initial_name.unwrap_or_default())
        .validate_with(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
        .interact_text()?;
    let dir = text(&theme, "Project directory", &format!("./{name}"))?;
    let description = text(&theme, "Brief project description", "")?;
    let business_context = text(
        &theme,
        "Business context, helps AI agents understand your project (optional)",
        "",
    )?;

    let mut builder = ConfigBuilder::new_project(name, PathBuf::from(dir), today)
        .description(description)
        .business_context(business_context);

    let type_labels: Vec<&str> = ProjectType::ALL.iter().map(|t| t.label()).collect();
    let project_type = ProjectType::ALL[choose(&theme, "Project type", &type_labels, 0)?];
    builder = builder.project_type(project_type);

    if project_type.includes_backend() {
        let labels: Vec<&str> = BACKEND_STACKS.iter().map(|s| s.label).collect();
        let default = BACKEND_STACKS.iter().position(|s| s.is_default).unwrap_or(0);
        let stack = &BACKEND_STACKS[choose(&theme, "Backend stack", &labels, default)?];
        let custom = if stack.is_custom() {
            Some(text(&theme, "Describe your backend stack", "")?)
        } else {
            None
        };
        builder = builder.backend_stack(stack.key, custom)?;
    }

    if project_type.includes_frontend() {
        let labels: Vec<&str> = FRONTEND_STACKS.iter().map(|s| s.label).collect();
        let default = FRONTEND_STACKS.iter().position(|s| s.is_default).unwrap_or(0);
        let stack = &FRONTEND_STACKS[choose(&theme, "Frontend stack", &labels, default)?];
        let custom = if stack.is_custom() {
            Some(text(&theme, "Describe your frontend stack", "")?)
        } else {
            None
        };
        builder = builder.frontend_stack(stack.key, custom)?;
    }

    for note in builder.current().advisory_notes() {
        output.info(&note)?;
    }

    builder = builder.ai_tools(ask_ai_tools(&theme, defaults.ai_tools)?);
    let level = defaults
        .autonomy_level
        .unwrap_or(builder.current().autonomy.level);
    builder = builder.autonomy_level(ask_autonomy(&theme, level)?)?;
    builder = builder.branching(ask_branching(&theme, defaults.branching)?);

    if project_type.includes_backend() {
        let port: u16 = Input::with_theme(&theme)
            .with_prompt("Backend port")
            .default(defaults.backend_port)
            .interact_text()?;
        builder = builder.backend_port(port);
    }

    let config = builder.build()?;
    output.print("")?;
    output.header("Summary")?;
    for line in new_project_summary(&config) {
        output.print(&format!("  {line}"))?;
    }

    if confirm(&theme, "Proceed?", true)? {
        Ok(Outcome::Proceed(Box::new(config)))
    } else {
        Ok(Outcome::Cancelled)
    }
}

/// Confirm the scan and fill in what it could not detect.
pub(super) fn retrofit(mut builder: ConfigBuilder, output: &OutputManager) -> CliResult<Outcome> {
    let theme = ColorfulTheme::default();
    let Some(scan) = builder.current().scan().cloned() else {
        return Err(CliError::Core(
            sdd_core::application::ApplicationError::MissingScan.into(),
        ));
    };

    output.header("Analyzing existing project")?;
    output.print("Detected:")?;
    for line in scan.summary().lines() {
        output.print(&format!("  {line}"))?;
    }
    output.print("")?;

    let description = text(&theme, "Project description", &scan.description)?;
    builder = builder.description(description);

    if !confirm(&theme, "Is the detected stack correct?", true)? {
        output.print("Review ai-specs/specs/ after generation and adjust it to your stack.")?;
        let detected = builder.current().project_type;
        let labels: Vec<&str> = ProjectType::ALL.iter().map(|t| t.label()).collect();
        let default = ProjectType::ALL
            .iter()
            .position(|t| *t == detected)
            .unwrap_or(0);
        let chosen = choose(&theme, "Project type", &labels, default)?;
        builder = builder.project_type(ProjectType::ALL[chosen]);
    }

    let business_context = text(
        &theme,
        "Business context, helps AI agents understand your project (optional)",
        "",
    )?;
    builder = builder.business_context(business_context);

    let has_backend = builder.current().includes_backend();

    // API documentation
    if let Some(path) = &scan.existing_docs.openapi_path {
        output.info(&format!("OpenAPI file detected: {path}"))?;
        let import = confirm(&theme, "Import this as your API spec?", true)?;
        builder = builder.openapi_path(import.then(|| path.clone()));
    } else if has_backend {
        let options = [
            "Yes, an OpenAPI/Swagger file",
            "Yes, another format (will be copied to docs/specs/)",
            "No",
        ];
        match choose(&theme, "Do you have existing API documentation?", &options, 2)? {
            0 => {
                let path = text(&theme, "Path to OpenAPI/Swagger file", "")?;
                builder = builder.openapi_path(non_empty(path));
            }
            1 => {
                let path = text(&theme, "Path to API documentation file", "")?;
                builder = builder.data_model(non_empty(path).map(|path| DataModel {
                    path,
                    format: DataModelFormat::ApiDocs,
                }));
            }
            _ => {}
        }
    }

    // Data model
    if let Some(path) = &scan.existing_docs.prisma_schema_path {
        output.info(&format!(
            "Prisma schema detected: {path}. It will be referenced in your project facts."
        ))?;
    } else if has_backend {
        let options = [
            "Yes, a Prisma schema",
            "Yes, another format (SQL, ERD, Mermaid, etc.)",
            "No",
        ];
        match choose(&theme, "Do you have a data model definition?", &options, 2)? {
            0 => {
                let path = text(&theme, "Path to Prisma schema", "prisma/schema.prisma")?;
                builder = builder.data_model(non_empty(path).map(|path| DataModel {
                    path,
                    format: DataModelFormat::Prisma,
                }));
            }
            1 => {
                let path = text(&theme, "Path to data model file", "")?;
                if let Some(path) = non_empty(path) {
                    builder = builder.data_model(Some(DataModel {
                        path,
                        format: DataModelFormat::Other,
                    }));
                }
            }
            _ => {}
        }
    }

    let current = builder.current();
    let (tools, level, branching) = (current.ai_tools, current.autonomy.level, current.branching);
    builder = builder.ai_tools(ask_ai_tools(&theme, tools)?);
    builder = builder.autonomy_level(ask_autonomy(&theme, level)?)?;
    builder = builder.branching(ask_branching(&theme, branching)?);

    let config = builder.build()?;
    output.print("")?;
    output.header("Summary")?;
    for line in retrofit_summary(&config) {
        output.print(&format!("  {line}"))?;
    }

    if confirm(&theme, "Proceed?", true)? {
        Ok(Outcome::Proceed(Box::new(config)))
    } else {
        Ok(Outcome::Cancelled)
    }
}

// ── Shared questions ─────────────────────────────────────────────────────────

fn ask_ai_tools(theme: &ColorfulTheme, current: AiTools) -> CliResult<AiTools> {
    let labels: Vec<&str> = AiTools::ALL.iter().map(|t| t.label()).collect();
    let default = AiTools::ALL.iter().position(|t| *t == current).unwrap_or(0);
    Ok(AiTools::ALL[choose(theme, "AI tools", &labels, default)?])
}

fn ask_autonomy(theme: &ColorfulTheme, current: u8) -> CliResult<u8> {
    let labels: Vec<String> = AUTONOMY_LEVELS
        .iter()
        .map(|a| format!("{a}: {}", a.description))
        .collect();
    let default = AUTONOMY_LEVELS
        .iter()
        .position(|a| a.level == current)
        .unwrap_or(0);
    Ok(AUTONOMY_LEVELS[choose(theme, "Autonomy level", &labels, default)?].level)
}

fn ask_branching(theme: &ColorfulTheme, current: Branching) -> CliResult<Branching> {
    let labels: Vec<String> = Branching::ALL
        .iter()
        .map(|b| format!("{}: {}", b.label(), b.description()))
        .collect();
    let default = Branching::ALL.iter().position(|b| *b == current).unwrap_or(0);
    Ok(Branching::ALL[choose(theme, "Branching strategy", &labels, default)?])
}

// ── Primitives ───────────────────────────────────────────────────────────────

fn text(theme: &ColorfulTheme, prompt: &str, default: &str) -> CliResult<String> {
    let answer: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .show_default(!default.is_empty())
        .allow_empty(true)
        .interact_text()?;
    Ok(answer.trim().to_string())
}

fn choose<T: ToString>(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[T],
    default: usize,
) -> CliResult<usize> {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    Ok(Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?)
}

fn confirm(theme: &ColorfulTheme, prompt: &str, default: bool) -> CliResult<bool> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn non_empty(path: String) -> Option<String> {
    let path = path.trim();
    (!path.is_empty()).then(|| path.to_string())
}
