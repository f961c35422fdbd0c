//! The template corpus as loaded from a [`TemplateSource`].
//!
//! Paths are relative and `/`-separated regardless of platform.
//!
//! [`TemplateSource`]: crate::application::ports::TemplateSource

use std::collections::BTreeMap;

use crate::domain::presets::{BACKEND_AGENTS, FRONTEND_AGENTS, ProjectType};

/// Files rendered through the placeholder renderer. Every other file is
/// copied byte-for-byte.
pub const STAMPED_FILES: &[&str] = &[
    "AGENTS.md",
    "CLAUDE.md",
    "GEMINI.md",
    ".env.example",
    "ai-specs/specs/backend-standards.mdc",
    "ai-specs/specs/frontend-standards.mdc",
    "docs/project_notes/key_facts.md",
    "docs/project_notes/sprint-0-tracker.md",
    "docs/specs/api-spec.yaml",
];

pub const CLAUDE_DIR: &str = ".claude/";
pub const GEMINI_DIR: &str = ".gemini/";
pub const CLAUDE_FILE: &str = "CLAUDE.md";
pub const GEMINI_FILE: &str = "GEMINI.md";

pub const BACKEND_STANDARDS: &str = "ai-specs/specs/backend-standards.mdc";
pub const FRONTEND_STANDARDS: &str = "ai-specs/specs/frontend-standards.mdc";
pub const API_SPEC: &str = "docs/specs/api-spec.yaml";
pub const UI_COMPONENTS: &str = "docs/specs/ui-components.md";
pub const TICKETS_KEEP: &str = "docs/tickets/.gitkeep";
pub const ENV_EXAMPLE: &str = ".env.example";
pub const GITIGNORE: &str = ".gitignore";

const HOOKS_DIR: &str = ".claude/hooks/";

pub fn is_stamped(path: &str) -> bool {
    STAMPED_FILES.contains(&path)
}

/// Hook scripts get the executable bit.
pub fn is_executable(path: &str) -> bool {
    path.starts_with(HOOKS_DIR) && path.ends_with(".sh")
}

/// Agent definition for a side the project type leaves out.
///
/// Matches the file name in both `.claude/agents/` and `.gemini/agents/`.
pub fn is_excluded_agent(path: &str, project_type: ProjectType) -> bool {
    let in_agents = path.starts_with(".claude/agents/") || path.starts_with(".gemini/agents/");
    if !in_agents {
        return false;
    }
    let name = path.rsplit('/').next().unwrap_or(path);
    (!project_type.includes_frontend() && FRONTEND_AGENTS.contains(&name))
        || (!project_type.includes_backend() && BACKEND_AGENTS.contains(&name))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: String,
    pub content: String,
}

impl TemplateFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Every template file, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTree {
    files: BTreeMap<String, String>,
}

impl TemplateTree {
    pub fn new(files: impl IntoIterator<Item = TemplateFile>) -> Self {
        Self {
            files: files.into_iter().map(|f| (f.path, f.content)).collect(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Files whose path starts with `prefix`.
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter().filter(move |(p, _)| p.starts_with(prefix))
    }
}

impl FromIterator<TemplateFile> for TemplateTree {
    fn from_iter<I: IntoIterator<Item = TemplateFile>>(iter: I) -> Self {
        Self::new(iter)
    }
}
