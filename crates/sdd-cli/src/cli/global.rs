//! Flags that shape logging and output rather than what gets generated.

use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log materialization steps to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print nothing but errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours [env: NO_COLOR]
    #[arg(long, global = true, env = "NO_COLOR", hide_env = true)]
    pub no_color: bool,

    /// Read defaults from this TOML file instead of the user config
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How the run report is printed on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Rendering of stdout. `Auto` picks `Human` on a terminal, `Plain` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Checklist with colours and symbols
    Human,
    /// Same lines, no colours
    Plain,
    /// One JSON document describing the run
    Json,
}
