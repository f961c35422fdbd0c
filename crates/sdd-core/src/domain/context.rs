//! Render contexts for the two materialization modes.
//!
//! A new project fills every token from the chosen presets. A retrofit fills
//! them from the scan, and the lines for anything the scan did not find are
//! omitted. Custom stacks fall back to the bracketed fill-in prompts the
//! team replaces by hand.

use crate::domain::config::{Config, DataModelFormat, Retrofit};
use crate::domain::placeholder::{Placeholder as P, RenderContext, Section as S, SectionAction};
use crate::domain::presets::{
    DEFAULT_DATABASE_PORT, DEFAULT_DATABASE_URL, MONGODB_DATABASE_URL, MONGODB_PORT, ProjectType,
};
use crate::domain::scan::{ArchitecturePattern, Language, ScanResult};
use crate::domain::standards;

const BACKEND_STACK_PROMPT: &str = "[Framework, runtime, version]";
const DATABASE_PROMPT: &str = "[Type, host, port]";
const ORM_PROMPT: &str = "[Name, version]";
const FRONTEND_STACK_PROMPT: &str = "[Framework, version]";
const DATABASE_PORT_PROMPT: &str = "[e.g., 5432]";

const FRONTEND_HOSTING: &str = "[e.g., Vercel]";
const BACKEND_HOSTING: &str = "[e.g., Render]";
const SQL_HOSTING: &str = "[e.g., Neon, Supabase, RDS]";
const DOCUMENT_HOSTING: &str = "[e.g., MongoDB Atlas, Cosmos DB]";

const DOCS_TREE_LINE: &str = "└── docs/        ← Documentation";

pub fn api_base_url(port: u16) -> String {
    format!("http://localhost:{port}/api")
}

fn database_hosting(is_document_store: bool) -> &'static str {
    if is_document_store {
        DOCUMENT_HOSTING
    } else {
        SQL_HOSTING
    }
}

/// Tokens and sections both modes fill the same way.
fn shared(config: &Config) -> RenderContext {
    let mut ctx = RenderContext::new();
    let description = Some(config.description.clone()).filter(|d| !d.is_empty());

    ctx.text(P::ProjectName, &config.project_name)
        .text_or_omit(P::ProjectDescription, description)
        .text(P::BusinessContext, &config.business_context)
        .text(P::Branching, config.branching.as_str())
        .text(P::AutonomyLevel, config.autonomy.level.to_string())
        .text(P::AutonomyName, config.autonomy.name)
        .text(P::SprintStart, config.sprint.start_iso())
        .text(P::SprintEnd, config.sprint.end_iso())
        .text(P::FrontendPort, config.frontend_port.to_string())
        .text(P::FrontendHosting, FRONTEND_HOSTING)
        .text(P::BackendHosting, BACKEND_HOSTING)
        .section(
            S::ProjectInformation,
            SectionAction::keep_if(!config.business_context.is_empty()),
        );
    ctx
}

// ── New project ──────────────────────────────────────────────────────────────

/// Context for scaffolding a new project from its presets.
pub fn new_project(config: &Config) -> RenderContext {
    let mut ctx = shared(config);
    let backend = config.backend.preset;
    let frontend = config.frontend.preset;

    let backend_stack = match (backend.framework, backend.runtime) {
        (Some(framework), Some(runtime)) => format!("{framework}, {runtime}"),
        _ => custom_or(config.backend.custom.as_deref(), BACKEND_STACK_PROMPT),
    };
    let database = match (backend.db, backend.db_port) {
        (Some(db), Some(port)) => format!("{db}, localhost, {port}"),
        _ => DATABASE_PROMPT.to_string(),
    };
    let frontend_stack = match frontend {
        f if f.is_custom() => custom_or(config.frontend.custom.as_deref(), FRONTEND_STACK_PROMPT),
        f => [f.framework, f.styling, f.components, f.state]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", "),
    };

    ctx.text(P::BackendStack, backend_stack)
        .text(P::Database, database)
        .text(P::Orm, backend.orm.unwrap_or(ORM_PROMPT))
        .text(P::FrontendStack, frontend_stack)
        .text(P::BackendPort, config.backend_port.to_string())
        .text(
            P::DatabasePort,
            backend
                .db_port
                .map_or_else(|| DATABASE_PORT_PROMPT.to_string(), |p| p.to_string()),
        )
        .text(P::ApiBaseUrl, api_base_url(config.backend_port))
        .text(
            P::DatabaseHosting,
            database_hosting(backend.db == Some("MongoDB")),
        )
        .omit(P::DataModelPath)
        .text(P::DatabaseEnvVar, "DATABASE_URL")
        .text(P::DatabaseUrl, backend.database_url.unwrap_or(DEFAULT_DATABASE_URL))
        .text(P::ProjectTree, new_project_tree(config.project_type));

    ctx.text_or_omit(
        P::BackendPatterns,
        config.includes_backend().then(|| {
            let mut parts = vec!["DDD"];
            match config.backend.custom.as_deref() {
                Some(custom) if backend.is_custom() => parts.push(custom),
                _ => parts.extend(backend.framework.into_iter().chain(backend.orm)),
            }
            parts.join(", ")
        }),
    )
    .text_or_omit(
        P::FrontendPatterns,
        config.includes_frontend().then(|| match config.frontend.custom.as_deref() {
            Some(custom) if frontend.is_custom() => custom.to_string(),
            _ => [frontend.framework, frontend.styling, frontend.components]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", "),
        }),
    );

    let (backend_globs, frontend_globs) = match config.project_type {
        ProjectType::Fullstack => ("\"backend/src/**/*.ts\"", "\"frontend/**/*.{ts,tsx}\""),
        ProjectType::Backend | ProjectType::Frontend => ("\"src/**/*.ts\"", "\"src/**/*.{ts,tsx}\""),
    };
    ctx.text(P::BackendGlobs, backend_globs)
        .text(P::FrontendGlobs, frontend_globs);

    ctx.section(S::Backend, SectionAction::keep_if(config.includes_backend()))
        .section(S::Frontend, SectionAction::keep_if(config.includes_frontend()))
        .section(S::DataModel, SectionAction::Drop)
        .section(S::RetrofitTesting, SectionAction::Drop)
        .section(
            S::WorkspaceInstall,
            SectionAction::keep_if(config.project_type == ProjectType::Fullstack),
        );
    for section in [
        S::StackNotice,
        S::BackendTechStack,
        S::BackendArchitecture,
        S::DatabasePatterns,
        S::QuerySafety,
        S::QueryEfficiency,
        S::FrontendTechStack,
        S::FrontendStructure,
    ] {
        ctx.section(section, SectionAction::Keep);
    }
    ctx
}

fn custom_or(custom: Option<&str>, prompt: &str) -> String {
    custom
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(prompt)
        .to_string()
}

fn new_project_tree(project_type: ProjectType) -> String {
    let mut lines = vec!["project/"];
    if project_type.includes_backend() {
        lines.push("├── backend/     ← Backend (has its own package.json)");
    }
    if project_type.includes_frontend() {
        lines.push("├── frontend/    ← Frontend (has its own package.json)");
    }
    lines.push("├── ai-specs/    ← Standards and specs for AI agents");
    lines.push(DOCS_TREE_LINE);
    lines.join("\n")
}

// ── Retrofit ─────────────────────────────────────────────────────────────────

/// Context for adding the workflow to the project `retrofit.scan` describes.
pub fn retrofit(config: &Config, retrofit: &Retrofit) -> RenderContext {
    let mut ctx = shared(config);
    let scan = &retrofit.scan;
    let backend = &scan.backend;
    let is_mongo = backend.is_mongodb();
    let port = backend.port.unwrap_or(config.backend_port);

    let runtime = match scan.language {
        Language::TypeScript => "Node.js (TypeScript)",
        Language::JavaScript => "Node.js",
    };
    let backend_stack = match &backend.framework {
        Some(framework) => format!("{framework}, {runtime}"),
        None => runtime.to_string(),
    };
    let frontend_parts = [
        &scan.frontend.framework,
        &scan.frontend.styling,
        &scan.frontend.components,
        &scan.frontend.state,
    ]
    .into_iter()
    .filter_map(|p| p.as_deref())
    .collect::<Vec<_>>();
    let frontend_stack = if frontend_parts.is_empty() {
        "Unknown".to_string()
    } else {
        frontend_parts.join(", ")
    };

    ctx.text(P::BackendStack, backend_stack)
        .text_or_omit(P::Database, backend.db.clone())
        .text_or_omit(P::Orm, backend.orm.clone())
        .text(P::FrontendStack, frontend_stack)
        .text(P::BackendPort, port.to_string())
        .text(
            P::DatabasePort,
            if is_mongo { MONGODB_PORT } else { DEFAULT_DATABASE_PORT }.to_string(),
        )
        .text(P::ApiBaseUrl, api_base_url(port))
        .text(P::DatabaseHosting, database_hosting(is_mongo))
        .text(P::ProjectTree, retrofit_tree(scan))
        .text(P::BackendGlobs, standards::backend_globs(scan))
        .text(P::FrontendGlobs, standards::FRONTEND_GLOBS);

    if is_mongo {
        ctx.text(P::DatabaseEnvVar, "MONGODB_URI")
            .text(P::DatabaseUrl, MONGODB_DATABASE_URL);
    } else {
        ctx.text(P::DatabaseEnvVar, "DATABASE_URL")
            .text(P::DatabaseUrl, DEFAULT_DATABASE_URL);
    }

    match data_model_reference(retrofit) {
        Some(path) => ctx
            .text(P::DataModelPath, path)
            .section(S::DataModel, SectionAction::Keep),
        None => ctx
            .omit(P::DataModelPath)
            .section(S::DataModel, SectionAction::Drop),
    };

    ctx.text_or_omit(
        P::BackendPatterns,
        config.includes_backend().then(|| backend_patterns(scan)),
    )
    .text_or_omit(
        P::FrontendPatterns,
        config.includes_frontend().then(|| frontend_patterns(scan)),
    );

    ctx.section(S::Backend, SectionAction::keep_if(backend.detected))
        .section(S::Frontend, SectionAction::keep_if(scan.frontend.detected))
        .section(
            S::RetrofitTesting,
            SectionAction::keep_if(scan.tests.estimated_coverage.is_weak()),
        )
        .section(S::WorkspaceInstall, SectionAction::keep_if(scan.is_monorepo))
        .section(
            S::StackNotice,
            SectionAction::Replace(standards::RETROFIT_NOTICE.to_string()),
        )
        .section(
            S::BackendTechStack,
            SectionAction::Replace(standards::backend_tech_stack(scan)),
        )
        .section(
            S::BackendArchitecture,
            SectionAction::Replace(standards::backend_architecture(scan)),
        )
        .section(S::DatabasePatterns, standards::database_patterns(scan))
        .section(S::QuerySafety, standards::query_safety(scan))
        .section(S::QueryEfficiency, standards::query_efficiency(scan))
        .section(
            S::FrontendTechStack,
            SectionAction::Replace(standards::frontend_tech_stack(scan)),
        )
        .section(
            S::FrontendStructure,
            SectionAction::Replace(standards::frontend_structure(scan)),
        );
    ctx
}

/// The schema the key facts point at: a scanned Prisma schema first, then
/// whatever data model the user supplied.
fn data_model_reference(retrofit: &Retrofit) -> Option<String> {
    if let Some(path) = &retrofit.scan.existing_docs.prisma_schema_path {
        return Some(path.clone());
    }
    let model = retrofit.data_model.as_ref()?;
    match model.format {
        DataModelFormat::Prisma => Some(model.path.clone()),
        DataModelFormat::Other => model.import_destination(),
        DataModelFormat::ApiDocs => None,
    }
}

fn retrofit_tree(scan: &ScanResult) -> String {
    let mut lines = vec!["project/".to_string()];
    lines.extend(
        scan.root_dirs
            .iter()
            .filter(|d| d.as_str() != "docs/")
            .map(|d| format!("├── {d}")),
    );
    lines.push(DOCS_TREE_LINE.to_string());
    lines.join("\n")
}

fn short_pattern_label(pattern: ArchitecturePattern) -> Option<&'static str> {
    match pattern {
        ArchitecturePattern::Ddd => Some("DDD"),
        ArchitecturePattern::Unknown => None,
        other => Some(other.label()),
    }
}

fn backend_patterns(scan: &ScanResult) -> String {
    let parts: Vec<&str> = short_pattern_label(scan.src_structure.pattern)
        .into_iter()
        .chain(scan.backend.framework.as_deref())
        .chain(scan.backend.orm.as_deref())
        .collect();
    if parts.is_empty() {
        "project conventions".to_string()
    } else {
        parts.join(", ")
    }
}

fn frontend_patterns(scan: &ScanResult) -> String {
    let parts: Vec<&str> = [
        &scan.frontend.framework,
        &scan.frontend.styling,
        &scan.frontend.components,
    ]
    .into_iter()
    .filter_map(|p| p.as_deref())
    .collect();
    if parts.is_empty() {
        "project conventions".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::config::{ConfigBuilder, DataModel};
    use crate::domain::placeholder::Value;
    use crate::domain::scan::{BackendScan, Coverage};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    fn text(ctx: &RenderContext, p: P) -> String {
        match ctx.value(p) {
            Some(Value::Text(t)) => t.clone(),
            other => panic!("{p} resolved to {other:?}"),
        }
    }

    #[test]
    fn new_project_uses_preset_metadata() {
        let config = Config::new_project("acme", "./acme", today()).unwrap();
        let ctx = new_project(&config);

        assert_eq!(text(&ctx, P::BackendStack), "Express, Node.js");
        assert_eq!(text(&ctx, P::Database), "PostgreSQL, localhost, 5432");
        assert_eq!(text(&ctx, P::Orm), "Prisma");
        assert_eq!(
            text(&ctx, P::FrontendStack),
            "Next.js (App Router), Tailwind CSS, Radix UI, Zustand"
        );
        assert_eq!(text(&ctx, P::ApiBaseUrl), "http://localhost:3010/api");
        assert_eq!(text(&ctx, P::SprintStart), "2025-02-01");
        assert_eq!(text(&ctx, P::SprintEnd), "2025-02-15");
        assert_eq!(text(&ctx, P::BackendPatterns), "DDD, Express, Prisma");
        assert_eq!(ctx.value(P::ProjectDescription), Some(&Value::Omit));
        assert_eq!(ctx.action(S::ProjectInformation), Some(&SectionAction::Drop));
    }

    #[test]
    fn custom_backend_falls_back_to_prompts() {
        let config = ConfigBuilder::new_project("acme", "./acme", today())
            .backend_stack("custom", None)
            .unwrap()
            .build()
            .unwrap();
        let ctx = new_project(&config);

        assert_eq!(text(&ctx, P::BackendStack), BACKEND_STACK_PROMPT);
        assert_eq!(text(&ctx, P::Database), DATABASE_PROMPT);
        assert_eq!(text(&ctx, P::Orm), ORM_PROMPT);
        assert_eq!(text(&ctx, P::DatabasePort), DATABASE_PORT_PROMPT);
        assert_eq!(text(&ctx, P::DatabaseUrl), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn mongo_preset_switches_url_and_hosting() {
        let config = ConfigBuilder::new_project("acme", "./acme", today())
            .backend_stack("express-mongo-mongoose", None)
            .unwrap()
            .build()
            .unwrap();
        let ctx = new_project(&config);
        assert_eq!(text(&ctx, P::DatabaseUrl), MONGODB_DATABASE_URL);
        assert_eq!(text(&ctx, P::DatabaseHosting), DOCUMENT_HOSTING);
        assert_eq!(text(&ctx, P::DatabasePort), "27017");
    }

    #[test]
    fn excluded_side_is_dropped() {
        let config = ConfigBuilder::new_project("acme", "./acme", today())
            .project_type(ProjectType::Backend)
            .build()
            .unwrap();
        let ctx = new_project(&config);

        assert_eq!(ctx.action(S::Frontend), Some(&SectionAction::Drop));
        assert_eq!(ctx.action(S::Backend), Some(&SectionAction::Keep));
        assert_eq!(ctx.value(P::FrontendPatterns), Some(&Value::Omit));
        assert!(!text(&ctx, P::ProjectTree).contains("frontend/"));
        assert_eq!(ctx.action(S::WorkspaceInstall), Some(&SectionAction::Drop));
    }

    fn mongo_scan() -> ScanResult {
        let mut scan = ScanResult::empty("legacy");
        scan.backend = BackendScan {
            detected: true,
            framework: Some("Koa".into()),
            orm: None,
            db: Some("MongoDB".into()),
            port: Some(8080),
        };
        scan.root_dirs = vec!["docs/".into(), "src/".into()];
        scan.tests.estimated_coverage = Coverage::Low;
        scan
    }

    #[test]
    fn retrofit_values_come_from_the_scan() {
        let config = Config::retrofit(mongo_scan(), "/legacy", today());
        let ctx = retrofit(&config, config.retrofit.as_ref().unwrap());

        assert_eq!(text(&ctx, P::BackendStack), "Koa, Node.js");
        assert_eq!(text(&ctx, P::Database), "MongoDB");
        assert_eq!(ctx.value(P::Orm), Some(&Value::Omit));
        assert_eq!(text(&ctx, P::BackendPort), "8080");
        assert_eq!(text(&ctx, P::DatabasePort), "27017");
        assert_eq!(text(&ctx, P::DatabaseEnvVar), "MONGODB_URI");
        assert_eq!(text(&ctx, P::ApiBaseUrl), "http://localhost:8080/api");
        assert_eq!(ctx.action(S::Frontend), Some(&SectionAction::Drop));
        assert_eq!(ctx.action(S::RetrofitTesting), Some(&SectionAction::Keep));
        assert_eq!(ctx.action(S::DataModel), Some(&SectionAction::Drop));
    }

    #[test]
    fn retrofit_tree_lists_root_dirs_once() {
        let tree = retrofit_tree(&mongo_scan());
        assert_eq!(tree, format!("project/\n├── src/\n{DOCS_TREE_LINE}"));
    }

    #[test]
    fn retrofit_data_model_reference() {
        let config = ConfigBuilder::retrofit(mongo_scan(), "/legacy", today())
            .data_model(Some(DataModel {
                path: "design/model.sql".into(),
                format: DataModelFormat::Other,
            }))
            .build()
            .unwrap();
        let ctx = retrofit(&config, config.retrofit.as_ref().unwrap());
        assert_eq!(text(&ctx, P::DataModelPath), "docs/specs/model.sql");
        assert_eq!(ctx.action(S::DataModel), Some(&SectionAction::Keep));
    }

    #[test]
    fn retrofit_patterns() {
        let mut scan = mongo_scan();
        scan.src_structure.pattern = ArchitecturePattern::Ddd;
        assert_eq!(backend_patterns(&scan), "DDD, Koa");
        assert_eq!(frontend_patterns(&scan), "project conventions");
    }
}
