//! Scan model: what the scanner learned about an existing project.
//!
//! Every field is plain data. Closed sets are enums so downstream code
//! matches exhaustively instead of comparing strings. Optional facts use
//! `Option` and serialize as `null`, which keeps the JSON shape stable
//! whether or not a fact was detected.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Closed sets ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    #[default]
    JavaScript,
}

impl Language {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the source tree is organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitecturePattern {
    Ddd,
    Layered,
    Mvc,
    FeatureBased,
    HandlerBased,
    Flat,
    #[default]
    Unknown,
}

impl ArchitecturePattern {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ddd => "ddd",
            Self::Layered => "layered",
            Self::Mvc => "mvc",
            Self::FeatureBased => "feature-based",
            Self::HandlerBased => "handler-based",
            Self::Flat => "flat",
            Self::Unknown => "unknown",
        }
    }

    /// Heading label used in synthesized standards.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ddd => "DDD Layered",
            Self::Layered => "Layered",
            Self::Mvc => "MVC",
            Self::FeatureBased => "Feature-Based",
            Self::HandlerBased => "Handler-Based",
            Self::Flat => "Flat",
            Self::Unknown => "Custom",
        }
    }
}

impl fmt::Display for ArchitecturePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    Jest,
    Vitest,
    Mocha,
    #[default]
    None,
}

impl TestFramework {
    /// Display label, `None` when no unit framework is configured.
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            Self::Jest => Some("Jest"),
            Self::Vitest => Some("Vitest"),
            Self::Mocha => Some("Mocha"),
            Self::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum E2eFramework {
    Playwright,
    Cypress,
}

impl E2eFramework {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Playwright => "Playwright",
            Self::Cypress => "Cypress",
        }
    }
}

/// Rough test coverage estimate from the test/source file ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Coverage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Coverage weak enough that the sprint plan should start with tests.
    pub const fn is_weak(self) -> bool {
        matches!(self, Self::None | Self::Low)
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendScan {
    pub detected: bool,
    pub framework: Option<String>,
    pub orm: Option<String>,
    pub db: Option<String>,
    pub port: Option<u16>,
}

impl BackendScan {
    pub fn is_mongodb(&self) -> bool {
        self.db.as_deref() == Some("MongoDB")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendScan {
    pub detected: bool,
    pub framework: Option<String>,
    pub styling: Option<String>,
    pub components: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStructure {
    /// Directories under the source root, `a` and `a/b`, in listing order.
    pub dirs: Vec<String>,
    pub pattern: ArchitecturePattern,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestScan {
    pub framework: TestFramework,
    pub e2e_framework: Option<E2eFramework>,
    pub has_config: bool,
    pub test_files: usize,
    pub test_dirs: Vec<String>,
    pub estimated_coverage: Coverage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingDocs {
    pub has_openapi: bool,
    pub openapi_path: Option<String>,
    pub has_prisma_schema: bool,
    pub prisma_schema_path: Option<String>,
    pub has_readme: bool,
    pub has_env_example: bool,
}

// ── ScanResult ───────────────────────────────────────────────────────────────

/// Everything the scanner detected in one project directory.
///
/// A pure function of on-disk state: scanning an unchanged tree twice yields
/// equal values that serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub project_name: String,
    pub description: String,
    pub language: Language,
    pub backend: BackendScan,
    pub frontend: FrontendScan,
    pub is_monorepo: bool,
    /// Top-level directories, sorted, each with a trailing `/`.
    pub root_dirs: Vec<String>,
    pub src_structure: SourceStructure,
    pub tests: TestScan,
    pub existing_docs: ExistingDocs,
    pub git_branch: String,
    pub has_git: bool,
}

impl ScanResult {
    /// An empty scan for a project with the given name. Nothing detected.
    pub fn empty(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            description: String::new(),
            language: Language::default(),
            backend: BackendScan::default(),
            frontend: FrontendScan::default(),
            is_monorepo: false,
            root_dirs: Vec::new(),
            src_structure: SourceStructure::default(),
            tests: TestScan::default(),
            existing_docs: ExistingDocs::default(),
            git_branch: "main".to_string(),
            has_git: false,
        }
    }

    /// The conventional source root the scanner found, if any.
    ///
    /// Derived from `root_dirs` using the same candidate order as the scan.
    pub fn source_root(&self) -> Option<&'static str> {
        crate::domain::detection::SOURCE_ROOTS
            .iter()
            .copied()
            .find(|c| self.root_dirs.iter().any(|d| d.trim_end_matches('/') == *c))
    }

    /// Multi-line human summary shown before the retrofit questions.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Project:       {}", self.project_name),
            format!("Language:      {}", self.language.label()),
        ];

        lines.push(format!(
            "Backend:       {}",
            detected_parts(
                self.backend.detected,
                &[&self.backend.framework, &self.backend.orm, &self.backend.db],
            )
        ));
        lines.push(format!(
            "Frontend:      {}",
            detected_parts(
                self.frontend.detected,
                &[
                    &self.frontend.framework,
                    &self.frontend.styling,
                    &self.frontend.components,
                    &self.frontend.state,
                ],
            )
        ));
        lines.push(format!(
            "Architecture:  {}",
            self.src_structure.pattern.label()
        ));

        match self.tests.framework.label() {
            Some(label) => lines.push(format!(
                "Tests:         {label} ({} test files)",
                self.tests.test_files
            )),
            None => lines.push("Tests:         None detected".to_string()),
        }

        lines.push(format!(
            "Monorepo:      {}",
            if self.is_monorepo { "Yes" } else { "No" }
        ));

        if let Some(path) = &self.existing_docs.openapi_path {
            lines.push(format!("OpenAPI:       Found ({path})"));
        }
        if let Some(path) = &self.existing_docs.prisma_schema_path {
            lines.push(format!("Prisma schema: Found ({path})"));
        }

        lines.join("\n")
    }
}

fn detected_parts(detected: bool, parts: &[&Option<String>]) -> String {
    if !detected {
        return "Not detected".to_string();
    }
    let found: Vec<&str> = parts.iter().filter_map(|p| p.as_deref()).collect();
    if found.is_empty() {
        "Detected (unknown stack)".to_string()
    } else {
        found.join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn express_scan() -> ScanResult {
        let mut scan = ScanResult::empty("api");
        scan.language = Language::TypeScript;
        scan.backend = BackendScan {
            detected: true,
            framework: Some("Express".into()),
            orm: Some("Prisma".into()),
            db: Some("PostgreSQL".into()),
            port: Some(4000),
        };
        scan.root_dirs = vec!["prisma/".into(), "src/".into()];
        scan
    }

    #[test]
    fn enums_serialize_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&ArchitecturePattern::FeatureBased).unwrap(),
            "\"feature-based\""
        );
        assert_eq!(
            serde_json::to_string(&Language::TypeScript).unwrap(),
            "\"typescript\""
        );
        assert_eq!(serde_json::to_string(&Coverage::None).unwrap(), "\"none\"");
    }

    #[test]
    fn undetected_facts_serialize_as_null() {
        let json = serde_json::to_value(ScanResult::empty("x")).unwrap();
        assert!(json["backend"]["framework"].is_null());
        assert!(json["tests"]["e2e_framework"].is_null());
        assert_eq!(json["git_branch"], "main");
    }

    #[test]
    fn source_root_follows_candidate_order() {
        let mut scan = express_scan();
        assert_eq!(scan.source_root(), Some("src"));

        scan.root_dirs = vec!["app/".into(), "src/".into()];
        assert_eq!(scan.source_root(), Some("src"));

        scan.root_dirs = vec!["docs/".into()];
        assert_eq!(scan.source_root(), None);
    }

    #[test]
    fn summary_describes_detected_backend() {
        let summary = express_scan().summary();
        assert!(summary.contains("Backend:       Express + Prisma + PostgreSQL"));
        assert!(summary.contains("Frontend:      Not detected"));
        assert!(summary.contains("Tests:         None detected"));
        assert!(summary.contains("Language:      TypeScript"));
    }

    #[test]
    fn summary_marks_unknown_stack() {
        let mut scan = ScanResult::empty("x");
        scan.frontend.detected = true;
        let summary = scan.summary();
        assert!(summary.contains("Frontend:      Detected (unknown stack)"));
        assert!(summary.contains("Architecture:  Custom"));
        assert!(summary.contains("Monorepo:      No"));
    }

    #[test]
    fn weak_coverage_is_none_or_low() {
        assert!(Coverage::None.is_weak());
        assert!(Coverage::Low.is_weak());
        assert!(!Coverage::Medium.is_weak());
        assert!(!Coverage::High.is_weak());
    }
}
