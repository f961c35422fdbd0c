//! Command-line surface: one optional project name, `--yes`, `--init`, and
//! the global flags. Which mode runs is decided by [`Cli::mode`].

use clap::Parser;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "create-sdd-project",
    bin_name = "create-sdd-project",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold the SDD DevFlow workflow for AI-assisted development",
    long_about = "Creates a new project pre-configured with the Spec-Driven \
                  Development workflow (agents, skills, standards and sprint \
                  tracking for Claude Code and Gemini), or adds the workflow \
                  to an existing project with --init.",
    after_help = "EXAMPLES:\n\
        \x20 create-sdd-project                  # interactive wizard\n\
        \x20 create-sdd-project my-app --yes     # defaults, no questions\n\
        \x20 create-sdd-project --init           # add SDD to the current project\n\
        \x20 create-sdd-project --init --yes     # same, using detected values",
)]
pub struct Cli {
    /// Flags available in both modes.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Name of the new project.  The project is created in `./NAME` unless
    /// the wizard is told otherwise.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Accept every default instead of running the wizard.
    #[arg(short = 'y', long = "yes", help = "Skip the wizard and use defaults")]
    pub yes: bool,

    /// Add SDD DevFlow to the project in the current directory.
    #[arg(long = "init", help = "Add SDD DevFlow to an existing project")]
    pub init: bool,
}

/// What one invocation is asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    NewProject { name: Option<String>, yes: bool },
    Retrofit { name: Option<String>, yes: bool },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        let name = self.name.clone();
        if self.init {
            Mode::Retrofit {
                name,
                yes: self.yes,
            }
        } else {
            Mode::NewProject {
                name,
                yes: self.yes,
            }
        }
    }
}
