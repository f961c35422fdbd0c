//! Stack and structure detection over already-read inputs.
//!
//! Nothing here touches the filesystem. The scanner adapter reads the
//! manifest, env files, and schema, then hands their contents to these
//! functions. Every table is an ordered list of `(signals, outcome)` rules
//! evaluated top to bottom; the first rule with any matching signal wins, so
//! more specific entries sit above generic ones.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use self::Signal::{Dep, Scope};
use crate::domain::scan::{
    ArchitecturePattern, BackendScan, Coverage, E2eFramework, FrontendScan, TestFramework,
};

// ── Fixed locations ──────────────────────────────────────────────────────────

/// Directories never descended into. Hidden directories are skipped too.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    ".next",
    ".nuxt",
    "coverage",
    ".turbo",
];

/// Source root candidates, in priority order.
pub const SOURCE_ROOTS: &[&str] = &["src", "app", "server", "lib"];

/// Env files consulted for database and port, in priority order.
pub const ENV_FILES: &[&str] = &[".env", ".env.local", ".env.example", ".env.sample"];

pub const PRISMA_SCHEMA_PATHS: &[&str] = &[
    "prisma/schema.prisma",
    "src/prisma/schema.prisma",
    "backend/prisma/schema.prisma",
];

pub const OPENAPI_PATHS: &[&str] = &[
    "swagger.json",
    "swagger.yaml",
    "swagger.yml",
    "openapi.json",
    "openapi.yaml",
    "openapi.yml",
    "api-spec.yaml",
    "api-spec.yml",
    "api-spec.json",
    "docs/swagger.json",
    "docs/swagger.yaml",
    "docs/openapi.json",
    "docs/openapi.yaml",
    "docs/api-spec.yaml",
];

pub const MONOREPO_MARKERS: &[&str] = &["lerna.json", "turbo.json", "pnpm-workspace.yaml", "nx.json"];

pub const TEST_CONFIG_FILES: &[&str] = &[
    "jest.config.js",
    "jest.config.ts",
    "jest.config.mjs",
    "jest.config.cjs",
    "vitest.config.js",
    "vitest.config.ts",
    "vitest.config.mjs",
    ".mocharc.yml",
    ".mocharc.json",
    ".mocharc.js",
    "playwright.config.ts",
    "playwright.config.js",
    "cypress.config.ts",
    "cypress.config.js",
];

pub const TEST_DIR_NAMES: &[&str] = &["__tests__", "tests", "test"];

/// Maximum depth of the test-file census walk.
pub const CENSUS_MAX_DEPTH: usize = 6;

/// Depth of the source-root directory listing.
pub const STRUCTURE_MAX_DEPTH: usize = 2;

pub fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.') || SKIP_DIRS.contains(&name)
}

// ── Dependencies ─────────────────────────────────────────────────────────────

/// Union of a manifest's `dependencies` and `devDependencies` names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies(BTreeSet<String>);

impl Dependencies {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.0.iter().any(|d| d.starts_with(scope))
    }

    fn matches(&self, signal: &Signal) -> bool {
        match signal {
            Signal::Dep(name) => self.has(name),
            Signal::Scope(scope) => self.has_scope(scope),
        }
    }
}

// ── Rule tables ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Signal {
    /// An exact dependency name.
    Dep(&'static str),
    /// Any dependency under an npm scope such as `@radix-ui/`.
    Scope(&'static str),
}

#[derive(Debug)]
pub struct Rule<T: 'static> {
    pub signals: &'static [Signal],
    pub outcome: T,
}

const fn rule<T: 'static>(signals: &'static [Signal], outcome: T) -> Rule<T> {
    Rule { signals, outcome }
}

/// Outcome of the first rule with a signal present in `deps`.
pub fn first_match<T: Copy>(rules: &[Rule<T>], deps: &Dependencies) -> Option<T> {
    rules
        .iter()
        .find(|r| r.signals.iter().any(|s| deps.matches(s)))
        .map(|r| r.outcome)
}

pub static BACKEND_FRAMEWORKS: &[Rule<&str>] = &[
    rule(&[Dep("express")], "Express"),
    rule(&[Dep("fastify")], "Fastify"),
    rule(&[Dep("koa")], "Koa"),
    rule(&[Dep("@nestjs/core")], "NestJS"),
    rule(&[Dep("@hapi/hapi")], "Hapi"),
    rule(&[Dep("@adonisjs/core")], "AdonisJS"),
];

pub static ORMS: &[Rule<&str>] = &[
    rule(&[Dep("@prisma/client")], "Prisma"),
    rule(&[Dep("mongoose")], "Mongoose"),
    rule(&[Dep("typeorm")], "TypeORM"),
    rule(&[Dep("sequelize")], "Sequelize"),
    rule(&[Dep("drizzle-orm")], "Drizzle"),
    rule(&[Dep("knex")], "Knex"),
    rule(&[Dep("@mikro-orm/core")], "MikroORM"),
    rule(&[Dep("objection")], "Objection.js"),
];

pub static FRONTEND_FRAMEWORKS: &[Rule<&str>] = &[
    rule(&[Dep("next")], "Next.js"),
    rule(&[Dep("nuxt")], "Nuxt"),
    rule(&[Dep("@remix-run/react")], "Remix"),
    rule(&[Dep("astro")], "Astro"),
    rule(&[Dep("solid-js")], "SolidJS"),
    rule(&[Dep("react")], "React"),
    rule(&[Dep("vue")], "Vue"),
    rule(&[Dep("@angular/core")], "Angular"),
    rule(&[Dep("svelte")], "Svelte"),
];

pub static STYLING: &[Rule<&str>] = &[
    rule(&[Dep("tailwindcss")], "Tailwind CSS"),
    rule(&[Dep("styled-components")], "styled-components"),
    rule(&[Dep("@emotion/react"), Dep("@emotion/styled")], "Emotion"),
    rule(&[Dep("sass"), Dep("node-sass")], "Sass"),
];

pub static COMPONENT_LIBRARIES: &[Rule<&str>] = &[
    rule(
        &[
            Dep("@radix-ui/react-dialog"),
            Dep("@radix-ui/react-select"),
            Scope("@radix-ui/"),
        ],
        "Radix UI",
    ),
    rule(&[Dep("@headlessui/react")], "Headless UI"),
    rule(&[Dep("@mui/material")], "Material UI"),
    rule(&[Dep("@chakra-ui/react")], "Chakra UI"),
    rule(&[Dep("antd")], "Ant Design"),
];

pub static STATE_LIBRARIES: &[Rule<&str>] = &[
    rule(&[Dep("zustand")], "Zustand"),
    rule(&[Dep("@reduxjs/toolkit"), Dep("redux")], "Redux"),
    rule(&[Dep("jotai")], "Jotai"),
    rule(&[Dep("@tanstack/react-query")], "TanStack Query"),
    rule(&[Dep("recoil")], "Recoil"),
    rule(&[Dep("pinia")], "Pinia"),
    rule(&[Dep("mobx")], "MobX"),
];

pub static UNIT_TEST_FRAMEWORKS: &[Rule<TestFramework>] = &[
    rule(
        &[
            Dep("jest"),
            Dep("@jest/core"),
            Dep("ts-jest"),
            Dep("@types/jest"),
        ],
        TestFramework::Jest,
    ),
    rule(&[Dep("vitest")], TestFramework::Vitest),
    rule(&[Dep("mocha")], TestFramework::Mocha),
];

pub static E2E_FRAMEWORKS: &[Rule<E2eFramework>] = &[
    rule(
        &[Dep("@playwright/test"), Dep("playwright")],
        E2eFramework::Playwright,
    ),
    rule(&[Dep("cypress")], E2eFramework::Cypress),
];

// ── Database ─────────────────────────────────────────────────────────────────

static DATASOURCE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"datasource\s+\w+\s*\{[^}]*\}").expect("datasource regex is valid")
});

static PROVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"provider\s*=\s*"(\w+)""#).expect("provider regex is valid")
});

static DATABASE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"DATABASE_URL\s*=\s*(\S+)").expect("database url regex is valid")
});

static MONGO_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^MONGO(?:DB)?_URI\s*=").expect("mongo uri regex is valid")
});

static REDIS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^REDIS_URL\s*=").expect("redis url regex is valid"));

/// Database named by a Prisma schema's `datasource` provider.
///
/// Only the first `datasource` block is searched, so a `generator` block
/// above it can never contribute its own `provider`. The whole file is used
/// only when it has no datasource block at all.
pub fn prisma_database(schema: &str) -> Option<String> {
    let source = DATASOURCE_BLOCK
        .find(schema)
        .map_or(schema, |m| m.as_str());
    let provider = PROVIDER.captures(source)?.get(1)?.as_str();

    let label = match provider {
        "postgresql" | "postgres" => "PostgreSQL",
        "mysql" => "MySQL",
        "sqlite" => "SQLite",
        "sqlserver" => "SQL Server",
        "mongodb" => "MongoDB",
        "cockroachdb" => "CockroachDB",
        other => other,
    };
    Some(label.to_string())
}

/// Database suggested by a single env file's contents.
pub fn env_database(content: &str) -> Option<&'static str> {
    if let Some(caps) = DATABASE_URL.captures(content) {
        let url = caps[1].replace(['"', '\''], "");
        if url.starts_with("postgresql://") || url.starts_with("postgres://") {
            return Some("PostgreSQL");
        }
        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            return Some("MongoDB");
        }
        if url.starts_with("mysql://") {
            return Some("MySQL");
        }
        if url.contains("sqlite") {
            return Some("SQLite");
        }
    }
    if MONGO_URI.is_match(content) {
        return Some("MongoDB");
    }
    if REDIS_URL.is_match(content) {
        return Some("Redis");
    }
    None
}

/// The database cascade: Prisma schema, then Mongoose, then env files.
///
/// `env_contents` holds the files of [`ENV_FILES`] that exist, in order.
pub fn database(
    orm: Option<&str>,
    prisma_schema: Option<&str>,
    env_contents: &[String],
) -> Option<String> {
    if orm == Some("Prisma") {
        if let Some(db) = prisma_schema.and_then(prisma_database) {
            return Some(db);
        }
    }
    if orm == Some("Mongoose") {
        return Some("MongoDB".to_string());
    }
    env_contents
        .iter()
        .find_map(|c| env_database(c))
        .map(str::to_string)
}

// ── Port ─────────────────────────────────────────────────────────────────────

static ENV_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^PORT\s*=\s*["']?(\d+)"#).expect("env port regex is valid")
});

static SCRIPT_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--port\s+(\d+)|PORT=(\d+)|-p\s+(\d+)").expect("script port regex is valid")
});

/// Port from a single env file; quotes around the value are tolerated.
pub fn env_port(content: &str) -> Option<u16> {
    ENV_PORT.captures(content)?.get(1)?.as_str().parse().ok()
}

/// Port from the manifest scripts, joined in declaration order.
pub fn script_port<S: AsRef<str>>(scripts: &[S]) -> Option<u16> {
    let joined = scripts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    let caps = SCRIPT_PORT.captures(&joined)?;
    caps.iter()
        .skip(1)
        .flatten()
        .next()?
        .as_str()
        .parse()
        .ok()
}

/// Env files first, then scripts. Out-of-range values are ignored.
pub fn port<S: AsRef<str>>(env_contents: &[String], scripts: &[S]) -> Option<u16> {
    env_contents
        .iter()
        .find_map(|c| env_port(c))
        .or_else(|| script_port(scripts))
}

// ── Sides ────────────────────────────────────────────────────────────────────

/// Inputs to backend detection, read by the scanner.
#[derive(Debug)]
pub struct BackendSignals<'a> {
    pub deps: &'a Dependencies,
    pub prisma_schema: Option<&'a str>,
    pub env_contents: &'a [String],
    pub scripts: &'a [String],
}

pub fn backend(signals: &BackendSignals<'_>) -> BackendScan {
    let framework = first_match(BACKEND_FRAMEWORKS, signals.deps);
    let orm = first_match(ORMS, signals.deps);
    let db = database(orm, signals.prisma_schema, signals.env_contents);
    let port = port(signals.env_contents, signals.scripts);

    BackendScan {
        detected: framework.is_some() || orm.is_some() || db.is_some(),
        framework: framework.map(str::to_string),
        orm: orm.map(str::to_string),
        db,
        port,
    }
}

pub fn frontend(deps: &Dependencies) -> FrontendScan {
    let framework = first_match(FRONTEND_FRAMEWORKS, deps);
    FrontendScan {
        detected: framework.is_some(),
        framework: framework.map(str::to_string),
        styling: first_match(STYLING, deps).map(str::to_string),
        components: first_match(COMPONENT_LIBRARIES, deps).map(str::to_string),
        state: first_match(STATE_LIBRARIES, deps).map(str::to_string),
    }
}

pub fn unit_test_framework(deps: &Dependencies) -> TestFramework {
    first_match(UNIT_TEST_FRAMEWORKS, deps).unwrap_or_default()
}

pub fn e2e_framework(deps: &Dependencies) -> Option<E2eFramework> {
    first_match(E2E_FRAMEWORKS, deps)
}

// ── Structure ────────────────────────────────────────────────────────────────

/// Classify a source tree from its directory listing.
///
/// Only the last segment of each path counts, so `api/controllers` and
/// `controllers` both signal controllers.
pub fn architecture<S: AsRef<str>>(dirs: &[S]) -> ArchitecturePattern {
    let names: BTreeSet<&str> = dirs
        .iter()
        .map(|d| d.as_ref().rsplit('/').next().unwrap_or_default())
        .collect();
    let has = |candidates: &[&str]| candidates.iter().any(|c| names.contains(c));

    let controllers = has(&["controllers", "controller"]);
    let routes = has(&["routes", "router"]);
    let models = has(&["models", "model"]);
    let handlers = has(&["handlers", "handler"]);
    let managers = has(&["managers", "manager"]);
    let domain = has(&["domain"]);

    if domain && has(&["application", "infrastructure"]) {
        ArchitecturePattern::Ddd
    } else if handlers && controllers && managers {
        ArchitecturePattern::Layered
    } else if controllers && models {
        ArchitecturePattern::Mvc
    } else if has(&["features", "modules"]) {
        ArchitecturePattern::FeatureBased
    } else if handlers && routes {
        ArchitecturePattern::HandlerBased
    } else if dirs.len() <= 3 {
        ArchitecturePattern::Flat
    } else {
        ArchitecturePattern::Unknown
    }
}

// ── Tests census ─────────────────────────────────────────────────────────────

static TEST_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(test|spec)\.(ts|tsx|js|jsx|mjs)$").expect("test file regex is valid")
});

static SOURCE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(ts|tsx|js|jsx|mjs)$").expect("source file regex is valid"));

static TOOLING_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(config|setup|d)\.").expect("tooling file regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Test,
    Source,
    Other,
}

pub fn classify_file(name: &str) -> FileKind {
    if TEST_FILE.is_match(name) {
        FileKind::Test
    } else if SOURCE_FILE.is_match(name) && !TOOLING_FILE.is_match(name) {
        FileKind::Source
    } else {
        FileKind::Other
    }
}

pub fn is_typed_source(name: &str) -> bool {
    name.ends_with(".ts") || name.ends_with(".tsx")
}

pub fn coverage(test_files: usize, source_files: usize) -> Coverage {
    if test_files == 0 {
        return Coverage::None;
    }
    if source_files == 0 {
        return Coverage::Low;
    }
    let ratio = test_files as f64 / source_files as f64;
    if ratio >= 0.5 {
        Coverage::High
    } else if ratio >= 0.2 {
        Coverage::Medium
    } else {
        Coverage::Low
    }
}

// ── Git ──────────────────────────────────────────────────────────────────────

static HEAD_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ref: refs/heads/(.+)").expect("head ref regex is valid"));

pub const DEFAULT_BRANCH: &str = "main";

/// Current branch from `.git/HEAD`, `main` for a detached or unreadable head.
pub fn git_branch(head: Option<&str>) -> String {
    head.and_then(|h| HEAD_REF.captures(h.trim()))
        .and_then(|c| c.get(1))
        .map_or_else(|| DEFAULT_BRANCH.to_string(), |m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(names: &[&str]) -> Dependencies {
        Dependencies::new(names.iter().copied())
    }

    #[test]
    fn express_prisma_postgres_backend() {
        let d = deps(&["express", "@prisma/client", "prisma"]);
        let schema = "datasource db {\n  provider = \"postgresql\"\n  url = env(\"DATABASE_URL\")\n}\n";
        let scan = backend(&BackendSignals {
            deps: &d,
            prisma_schema: Some(schema),
            env_contents: &[],
            scripts: &[],
        });

        assert!(scan.detected);
        assert_eq!(scan.framework.as_deref(), Some("Express"));
        assert_eq!(scan.orm.as_deref(), Some("Prisma"));
        assert_eq!(scan.db.as_deref(), Some("PostgreSQL"));
    }

    #[test]
    fn orm_alone_marks_backend_detected() {
        let d = deps(&["knex"]);
        let scan = backend(&BackendSignals {
            deps: &d,
            prisma_schema: None,
            env_contents: &[],
            scripts: &[],
        });

        assert!(scan.detected);
        assert_eq!(scan.framework, None);
        assert_eq!(scan.orm.as_deref(), Some("Knex"));
    }

    #[test]
    fn generator_block_does_not_leak_provider() {
        let schema = r#"
generator client {
  output = "../generated"
}

datasource db {
  provider = "mysql"
  url      = env("DATABASE_URL")
}
"#;
        assert_eq!(prisma_database(schema).as_deref(), Some("MySQL"));

        let with_generator_provider = r#"
generator client {
  provider = "prisma-client-js"
}
datasource db {
  provider = "sqlite"
}
"#;
        assert_eq!(
            prisma_database(with_generator_provider).as_deref(),
            Some("SQLite")
        );
    }

    #[test]
    fn unknown_provider_reported_raw() {
        let schema = "datasource db { provider = \"planetscale\" }";
        assert_eq!(prisma_database(schema).as_deref(), Some("planetscale"));
    }

    #[test]
    fn mongoose_implies_mongodb() {
        assert_eq!(
            database(Some("Mongoose"), None, &[]).as_deref(),
            Some("MongoDB")
        );
    }

    #[test]
    fn env_database_cascade() {
        assert_eq!(
            env_database("DATABASE_URL=\"postgres://u:p@h/db\""),
            Some("PostgreSQL")
        );
        assert_eq!(env_database("DATABASE_URL=mongodb+srv://x"), Some("MongoDB"));
        assert_eq!(env_database("DATABASE_URL=mysql://x"), Some("MySQL"));
        assert_eq!(env_database("DATABASE_URL=file:./dev.sqlite"), Some("SQLite"));
        assert_eq!(env_database("MONGODB_URI=mongodb://x"), Some("MongoDB"));
        assert_eq!(env_database("PORT=1\nREDIS_URL=redis://x"), Some("Redis"));
        assert_eq!(env_database("PORT=3000"), None);

        let files = vec!["PORT=1".to_string(), "DATABASE_URL=mysql://x".to_string()];
        assert_eq!(database(None, None, &files).as_deref(), Some("MySQL"));
    }

    #[test]
    fn quoted_env_port_is_numeric() {
        assert_eq!(env_port("PORT=\"5000\"\n"), Some(5000));
        assert_eq!(env_port("NODE_ENV=dev\nPORT = '8080'"), Some(8080));
        assert_eq!(env_port("APP_PORT=9000"), None);
    }

    #[test]
    fn script_port_variants() {
        assert_eq!(script_port(&["next dev --port 4000"]), Some(4000));
        assert_eq!(script_port(&["PORT=4100 node server.js"]), Some(4100));
        assert_eq!(script_port(&["vite", "serve -p 4200"]), Some(4200));
        assert_eq!(script_port(&["node index.js"]), None);
    }

    #[test]
    fn env_port_wins_over_scripts_and_overflow_is_ignored() {
        let env = vec!["PORT=99999".to_string(), "PORT=7000".to_string()];
        assert_eq!(port(&env, &["--port 4000"]), Some(7000));
        assert_eq!(port(&[], &["--port 4000"]), Some(4000));
    }

    #[test]
    fn frontend_tables_are_first_match() {
        let d = deps(&[
            "next",
            "react",
            "tailwindcss",
            "sass",
            "@radix-ui/react-tooltip",
            "@reduxjs/toolkit",
            "zustand",
        ]);
        let scan = frontend(&d);
        assert!(scan.detected);
        assert_eq!(scan.framework.as_deref(), Some("Next.js"));
        assert_eq!(scan.styling.as_deref(), Some("Tailwind CSS"));
        assert_eq!(scan.components.as_deref(), Some("Radix UI"));
        assert_eq!(scan.state.as_deref(), Some("Zustand"));
    }

    #[test]
    fn test_frameworks_are_independent() {
        let d = deps(&["ts-jest", "vitest", "cypress"]);
        assert_eq!(unit_test_framework(&d), TestFramework::Jest);
        assert_eq!(e2e_framework(&d), Some(E2eFramework::Cypress));
        assert_eq!(unit_test_framework(&deps(&[])), TestFramework::None);
    }

    #[test]
    fn mvc_classification() {
        let dirs = ["controllers", "routes", "models", "middleware"];
        assert_eq!(architecture(&dirs), ArchitecturePattern::Mvc);
    }

    #[test]
    fn architecture_precedence() {
        assert_eq!(
            architecture(&["domain", "domain/user", "infrastructure", "api", "x"]),
            ArchitecturePattern::Ddd
        );
        assert_eq!(
            architecture(&["handlers", "controllers", "managers", "models"]),
            ArchitecturePattern::Layered
        );
        assert_eq!(
            architecture(&["modules", "modules/auth", "shared", "config"]),
            ArchitecturePattern::FeatureBased
        );
        assert_eq!(
            architecture(&["handler", "router", "utils", "types"]),
            ArchitecturePattern::HandlerBased
        );
        assert_eq!(architecture(&["utils"]), ArchitecturePattern::Flat);
        assert_eq!(
            architecture(&["a", "b", "c", "d"]),
            ArchitecturePattern::Unknown
        );
    }

    #[test]
    fn nested_segments_count() {
        assert_eq!(
            architecture(&["api", "api/controllers", "api/models", "db"]),
            ArchitecturePattern::Mvc
        );
    }

    #[test]
    fn file_classification() {
        assert_eq!(classify_file("user.test.ts"), FileKind::Test);
        assert_eq!(classify_file("user.spec.jsx"), FileKind::Test);
        assert_eq!(classify_file("user.ts"), FileKind::Source);
        assert_eq!(classify_file("jest.config.js"), FileKind::Other);
        assert_eq!(classify_file("types.d.ts"), FileKind::Other);
        assert_eq!(classify_file("README.md"), FileKind::Other);
    }

    #[test]
    fn coverage_thresholds() {
        assert_eq!(coverage(0, 10), Coverage::None);
        assert_eq!(coverage(3, 0), Coverage::Low);
        assert_eq!(coverage(1, 10), Coverage::Low);
        assert_eq!(coverage(2, 10), Coverage::Medium);
        assert_eq!(coverage(5, 10), Coverage::High);
    }

    #[test]
    fn branch_from_head() {
        assert_eq!(git_branch(Some("ref: refs/heads/develop\n")), "develop");
        assert_eq!(git_branch(Some("ref: refs/heads/feat/x")), "feat/x");
        assert_eq!(git_branch(Some("3f2a9c0d")), "main");
        assert_eq!(git_branch(None), "main");
    }

    #[test]
    fn hidden_and_build_dirs_are_skipped() {
        assert!(is_skipped_dir("node_modules"));
        assert!(is_skipped_dir(".cache"));
        assert!(is_skipped_dir("coverage"));
        assert!(!is_skipped_dir("src"));
    }
}
