//! `create-sdd-project`: scaffold a project wired for the SDD DevFlow
//! workflow, or add the workflow to the project in the current directory
//! with `--init`.
//!
//! Exit status is 0 on success, help, version and a cancelled wizard, and 1
//! for every failure, argument errors included.

use std::io::IsTerminal as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Mode},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod wizard;

fn main() -> ExitCode {
    // A project-local .env may carry SDD_* overrides. Loaded before parsing
    // so clap sees them, reported once logging is up.
    let dotenv = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too, on stdout.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    if let Some(problem) = dotenv_problem(&dotenv) {
        debug!(error = %problem, ".env not loaded");
    }

    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color && std::io::stderr().is_terminal();
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        color,
        "arguments parsed"
    );

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return fail(err, verbose, color);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    debug!(format = ?output.format(), "output ready");

    match run(cli.mode(), config, output) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e, verbose, color),
    }
}

#[instrument(skip_all)]
fn run(mode: Mode, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match mode {
        Mode::NewProject { name, yes } => commands::new::execute(name, yes, config, output),
        Mode::Retrofit { name, yes } => commands::init::execute(name, yes, config, output),
    }
}

/// A missing `.env` is normal; anything else is worth a debug line.
fn dotenv_problem(result: &dotenvy::Result<PathBuf>) -> Option<String> {
    match result {
        Err(e) if !e.not_found() => Some(e.to_string()),
        _ => None,
    }
}

/// Log the error, explain it on stderr, and pick the exit status.
fn fail(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, color));
    ExitCode::from(err.exit_code())
}
