//! Text synthesized from a scan when adding the workflow to an existing
//! project.
//!
//! Each function yields the body of one template section or token. Facts the
//! scan did not find are left out rather than printed as "Unknown", and every
//! guess is paired with a TODO marker for the team to review.

use crate::domain::placeholder::SectionAction;
use crate::domain::scan::ScanResult;

/// Replaces the default-stack notice at the top of both standards files.
pub const RETROFIT_NOTICE: &str = "\
<!-- TODO: Review and adjust the sections below to match your project's conventions. -->
<!-- This file was generated from project analysis by create-sdd-project --init. -->
";

const LAYER_RULES_TODO: &str = "<!-- TODO: Add layer rules that match your project's architecture. -->";
const MAP_STRUCTURE_TODO: &str = "<!-- TODO: Map your project structure here -->";
const EXPAND_STRUCTURE_TODO: &str =
    "<!-- TODO: Expand the structure above with your key subdirectories. -->";

/// Root entries hidden from the frontend structure tree.
const STRUCTURE_EXCLUDED: &[&str] = &["docs/", "ai-specs/", "node_modules/"];

fn testing_label(scan: &ScanResult) -> &'static str {
    scan.tests.framework.label().unwrap_or("Not configured")
}

// ── Backend ──────────────────────────────────────────────────────────────────

/// Frontmatter globs for backend standards.
pub fn backend_globs(scan: &ScanResult) -> String {
    match scan.source_root() {
        Some(root) => format!("\"{root}/**/*.{{ts,js,tsx,jsx}}\""),
        None => "\"**/*.{ts,js,tsx,jsx}\"".to_string(),
    }
}

pub fn backend_tech_stack(scan: &ScanResult) -> String {
    let mut lines = vec![format!("- **Runtime**: Node.js with {}", scan.language.label())];
    let backend = &scan.backend;

    if let Some(framework) = &backend.framework {
        lines.push(format!("- **Framework**: {framework}"));
    }
    match (&backend.orm, &backend.db) {
        (Some(orm), Some(db)) => lines.push(format!("- **ORM**: {orm} ({db})")),
        (Some(orm), None) => lines.push(format!("- **ORM**: {orm}")),
        (None, Some(db)) => lines.push(format!("- **Database**: {db}")),
        (None, None) => {}
    }
    lines.push(format!("- **Testing**: {}", testing_label(scan)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Depth-one tree of the scanned source root.
pub fn architecture_tree(scan: &ScanResult) -> String {
    let root = scan.source_root().unwrap_or("project");
    let top_level: Vec<&str> = scan
        .src_structure
        .dirs
        .iter()
        .map(String::as_str)
        .filter(|d| !d.contains('/'))
        .collect();

    let mut tree = format!("{root}/\n");
    if top_level.is_empty() {
        tree.push_str(&format!("└── {MAP_STRUCTURE_TODO}\n"));
        return tree;
    }
    for (i, dir) in top_level.iter().enumerate() {
        let branch = if i + 1 == top_level.len() { "└── " } else { "├── " };
        tree.push_str(&format!("{branch}{dir}/\n"));
    }
    tree
}

pub fn backend_architecture(scan: &ScanResult) -> String {
    format!(
        "## Architecture — {}\n\n```\n{}```\n\n{LAYER_RULES_TODO}\n",
        scan.src_structure.pattern.label(),
        architecture_tree(scan)
    )
}

/// Prisma keeps the bundled guidance; anything else gets a TODO.
pub fn database_patterns(scan: &ScanResult) -> SectionAction {
    match scan.backend.orm.as_deref() {
        Some("Prisma") => SectionAction::Keep,
        Some(orm) => SectionAction::Replace(format!(
            "<!-- TODO: Add {orm} best practices and patterns for your project. -->\n"
        )),
        None => SectionAction::Replace(
            "<!-- TODO: Add database access patterns for your project. -->\n".to_string(),
        ),
    }
}

fn uses_prisma(scan: &ScanResult) -> bool {
    scan.backend.orm.as_deref() == Some("Prisma")
}

pub fn query_safety(scan: &ScanResult) -> SectionAction {
    if uses_prisma(scan) {
        SectionAction::Keep
    } else {
        SectionAction::Replace("- Use parameterized queries to prevent injection attacks\n".into())
    }
}

pub fn query_efficiency(scan: &ScanResult) -> SectionAction {
    if uses_prisma(scan) {
        SectionAction::Keep
    } else {
        SectionAction::Replace("- Avoid N+1 queries — use eager loading or batch fetching\n".into())
    }
}

// ── Frontend ─────────────────────────────────────────────────────────────────

pub const FRONTEND_GLOBS: &str = "\"**/*.{ts,tsx,js,jsx}\", \"!node_modules/**\"";

pub fn frontend_tech_stack(scan: &ScanResult) -> String {
    let frontend = &scan.frontend;
    let mut lines = Vec::new();

    if let Some(framework) = &frontend.framework {
        lines.push(format!("- **Framework**: {framework}"));
    }
    lines.push(format!("- **Language**: {}", scan.language.label()));
    lines.push(format!(
        "- **Styling**: {}",
        frontend.styling.as_deref().unwrap_or("CSS")
    ));
    if let Some(components) = &frontend.components {
        lines.push(format!("- **Components**: {components}"));
    }
    if let Some(state) = &frontend.state {
        lines.push(format!("- **State Management**: {state}"));
    }
    lines.push(format!("- **Testing**: {}", testing_label(scan)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn frontend_structure(scan: &ScanResult) -> String {
    let dirs: Vec<&str> = scan
        .root_dirs
        .iter()
        .map(String::as_str)
        .filter(|d| !STRUCTURE_EXCLUDED.contains(d))
        .collect();

    let mut out = String::from("```\nproject/\n");
    for (i, dir) in dirs.iter().enumerate() {
        let branch = if i + 1 == dirs.len() { "└── " } else { "├── " };
        out.push_str(&format!("{branch}{dir}\n"));
    }
    out.push_str("```\n\n");
    out.push_str(EXPAND_STRUCTURE_TODO);
    out.push('\n');
    out
}
