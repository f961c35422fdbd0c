//! What the user sees on stdout.
//!
//! Human formats write checklist-style lines to stdout.  The JSON format
//! keeps stdout for a single machine-readable document and silences
//! everything else.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use sdd_core::application::MaterializeReport;
use sdd_core::domain::ScanResult;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Writes progress and the final report in the resolved format.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

/// The JSON document printed for `--output-format json`.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub mode: &'static str,
    pub project_name: &'a str,
    pub project_dir: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan: Option<&'a ScanResult>,
    pub report: &'a MaterializeReport,
}

impl OutputManager {
    /// Colour needs the human format and neither `--no-color` nor config opting out.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    fn silent(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }

    /// Unadorned line.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2713}", msg, |s| s.green().bold().to_string())
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{26a0}", msg, |s| s.yellow().bold().to_string())
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2139}", msg, |s| s.blue().bold().to_string())
    }

    fn marked(&self, mark: &str, msg: &str, paint: impl Fn(&str) -> String) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {mark} {msg}")
        } else {
            format!("  {} {msg}", paint(mark))
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Print what a materialization run did.
    ///
    /// Checklist first, then skipped files, notes and next steps.  In JSON
    /// mode the whole summary is one document instead.
    pub fn report(&self, summary: &RunSummary<'_>) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
            return self.term.write_line(&json);
        }

        let report = summary.report;
        for step in &report.steps {
            self.success(step)?;
        }

        if !report.skipped.is_empty() {
            self.print("")?;
            for skipped in &report.skipped {
                self.warning(&format!("Skipped {} ({})", skipped.path, skipped.reason))?;
            }
        }

        if !report.notes.is_empty() {
            self.print("")?;
            for note in &report.notes {
                self.info(note)?;
            }
        }

        self.print("")?;
        self.header("Done! Next steps:")?;
        for step in &report.next_steps {
            self.print(&format!("  {step}"))?;
        }
        self.print("")
    }

    /// A spinner on stderr for long-running work; hidden when output is
    /// silenced or stderr is not a terminal.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.silent() || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.silent());
        assert!(out.print("hello").is_ok());
        assert!(out.warning("skipped").is_ok());
    }

    #[test]
    fn only_human_format_uses_color() {
        assert!(!make_manager(false, false, OutputFormat::Human).no_color);
        assert!(make_manager(false, true, OutputFormat::Human).no_color);
        assert!(make_manager(false, false, OutputFormat::Plain).no_color);
        assert!(make_manager(false, false, OutputFormat::Json).no_color);
    }

    #[test]
    fn config_can_disable_color() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(OutputManager::new(&args, &config).no_color);
    }

    #[test]
    fn explicit_format_is_kept() {
        assert_eq!(
            make_manager(false, false, OutputFormat::Json).format(),
            OutputFormat::Json
        );
    }

    #[test]
    fn spinner_is_hidden_when_silent() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.spinner("Scanning project...").is_hidden());
    }

    #[test]
    fn run_summary_serializes_report_fields() {
        let report = MaterializeReport {
            steps: vec!["Copying template files".into()],
            next_steps: vec!["cd ./my-app".into()],
            ..MaterializeReport::default()
        };
        let summary = RunSummary {
            mode: "new",
            project_name: "my-app",
            project_dir: Path::new("./my-app"),
            scan: None,
            report: &report,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["mode"], "new");
        assert_eq!(json["project_dir"], "./my-app");
        assert_eq!(json["report"]["steps"][0], "Copying template files");
        assert!(json.get("scan").is_none());
    }
}
