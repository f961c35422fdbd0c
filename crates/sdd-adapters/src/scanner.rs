//! On-disk project scanner.
//!
//! Reads the manifest, env files, schema and directory layout of an existing
//! project and hands their contents to the pure rules in
//! [`sdd_core::domain::detection`]. Nothing here fails: an unreadable file is
//! logged at `debug` and treated as absent.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};
use walkdir::{DirEntry, WalkDir};

use sdd_core::application::ports::ProjectScanner;
use sdd_core::domain::detection::{
    self, BackendSignals, Dependencies, FileKind, CENSUS_MAX_DEPTH, ENV_FILES, MONOREPO_MARKERS,
    OPENAPI_PATHS, PRISMA_SCHEMA_PATHS, SOURCE_ROOTS, STRUCTURE_MAX_DEPTH, TEST_CONFIG_FILES,
    TEST_DIR_NAMES,
};
use sdd_core::domain::scan::{
    ExistingDocs, Language, ScanResult, SourceStructure, TestScan,
};

/// Scans a project directory on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskScanner;

impl DiskScanner {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectScanner for DiskScanner {
    #[instrument(skip_all, fields(root = %root.display()))]
    fn scan(&self, root: &Path) -> ScanResult {
        let manifest = Manifest::read(root);
        let deps = manifest.dependencies();

        let project_name = manifest.string("name").unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let mut scan = ScanResult::empty(project_name);
        scan.description = manifest.string("description").unwrap_or_default();

        let env_contents: Vec<String> = ENV_FILES
            .iter()
            .filter_map(|name| read_optional(&root.join(name)))
            .collect();
        let (prisma_path, prisma_schema) = match find_prisma_schema(root) {
            Some((path, schema)) => (Some(path), Some(schema)),
            None => (None, None),
        };
        let scripts = manifest.scripts();

        scan.backend = detection::backend(&BackendSignals {
            deps: &deps,
            prisma_schema: prisma_schema.as_deref(),
            env_contents: &env_contents,
            scripts: &scripts,
        });
        scan.frontend = detection::frontend(&deps);
        scan.is_monorepo = manifest.has("workspaces")
            || MONOREPO_MARKERS.iter().any(|m| root.join(m).exists());
        scan.root_dirs = root_dirs(root);

        let source_root = SOURCE_ROOTS
            .iter()
            .map(|c| root.join(c))
            .find(|p| p.is_dir())
            .unwrap_or_else(|| root.to_path_buf());
        scan.language = language(root, &source_root);
        let dirs = list_dirs(&source_root);
        scan.src_structure = SourceStructure {
            pattern: detection::architecture(&dirs),
            dirs,
        };

        scan.tests = tests(root, &deps);

        let openapi_path = first_existing(root, OPENAPI_PATHS);
        scan.existing_docs = ExistingDocs {
            has_openapi: openapi_path.is_some(),
            openapi_path: openapi_path.map(str::to_string),
            has_prisma_schema: prisma_path.is_some(),
            prisma_schema_path: prisma_path.map(str::to_string),
            has_readme: root.join("README.md").exists(),
            has_env_example: root.join(".env.example").exists()
                || root.join(".env.sample").exists(),
        };

        let git_dir = root.join(".git");
        scan.has_git = git_dir.exists();
        scan.git_branch = detection::git_branch(read_optional(&git_dir.join("HEAD")).as_deref());

        info!(
            backend = scan.backend.detected,
            frontend = scan.frontend.detected,
            pattern = %scan.src_structure.pattern,
            "Project scanned"
        );
        scan
    }
}

/// The parsed `package.json`, empty when missing or malformed.
struct Manifest(Map<String, Value>);

impl Manifest {
    fn read(root: &Path) -> Self {
        let path = root.join("package.json");
        let Some(raw) = read_optional(&path) else {
            return Self(Map::new());
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Self(map),
            Ok(_) => {
                debug!(path = %path.display(), "Manifest is not an object");
                Self(Map::new())
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Malformed manifest");
                Self(Map::new())
            }
        }
    }

    fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn dependencies(&self) -> Dependencies {
        let names = ["dependencies", "devDependencies"]
            .iter()
            .filter_map(|section| self.0.get(*section).and_then(Value::as_object))
            .flat_map(|deps| deps.keys().cloned());
        Dependencies::new(names)
    }

    /// Script bodies in declaration order.
    fn scripts(&self) -> Vec<String> {
        self.0
            .get("scripts")
            .and_then(Value::as_object)
            .map(|scripts| {
                scripts
                    .values()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn read_optional(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Unreadable file ignored");
            None
        }
    }
}

/// The first schema naming a datasource provider, else the first one found.
fn find_prisma_schema(root: &Path) -> Option<(&'static str, String)> {
    let mut fallback = None;
    for &path in PRISMA_SCHEMA_PATHS {
        let Some(schema) = read_optional(&root.join(path)) else {
            continue;
        };
        if detection::prisma_database(&schema).is_some() {
            return Some((path, schema));
        }
        debug!(path, "Prisma schema without a provider, trying the next one");
        if fallback.is_none() {
            fallback = Some((path, schema));
        }
    }
    fallback
}

fn first_existing(root: &Path, candidates: &'static [&'static str]) -> Option<&'static str> {
    candidates.iter().copied().find(|c| root.join(c).exists())
}

fn is_visible_dir(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry.file_type().is_dir()
        || !detection::is_skipped_dir(&entry.file_name().to_string_lossy())
}

fn root_dirs(root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_entry(is_visible_dir)
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_dir() => {
                Some(format!("{}/", e.file_name().to_string_lossy()))
            }
            Ok(_) => None,
            Err(err) => {
                debug!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .collect();
    dirs.sort();
    dirs
}

/// Directories under the source root as `a` and `a/b`, parents first.
fn list_dirs(source_root: &Path) -> Vec<String> {
    WalkDir::new(source_root)
        .min_depth(1)
        .max_depth(STRUCTURE_MAX_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_visible_dir)
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| {
            e.path()
                .strip_prefix(source_root)
                .ok()
                .map(|rel| normalize_path(&rel.to_string_lossy()))
        })
        .collect()
}

fn language(root: &Path, source_root: &Path) -> Language {
    if root.join("tsconfig.json").exists() {
        return Language::TypeScript;
    }
    let typed = fs::read_dir(source_root)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .any(|e| detection::is_typed_source(&e.file_name().to_string_lossy()))
        })
        .unwrap_or(false);
    if typed {
        Language::TypeScript
    } else {
        Language::JavaScript
    }
}

fn tests(root: &Path, deps: &Dependencies) -> TestScan {
    let mut test_files = 0;
    let mut source_files = 0;
    let mut test_dirs: Vec<String> = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(CENSUS_MAX_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_visible_dir);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() {
            if TEST_DIR_NAMES.contains(&name.as_ref()) {
                let dir = format!("{name}/");
                if !test_dirs.contains(&dir) {
                    test_dirs.push(dir);
                }
            }
            continue;
        }
        match detection::classify_file(&name) {
            FileKind::Test => test_files += 1,
            FileKind::Source => source_files += 1,
            FileKind::Other => {}
        }
    }

    debug!(test_files, source_files, "Test census complete");

    TestScan {
        framework: detection::unit_test_framework(deps),
        e2e_framework: detection::e2e_framework(deps),
        has_config: TEST_CONFIG_FILES.iter().any(|f| root.join(f).exists()),
        test_files,
        test_dirs,
        estimated_coverage: detection::coverage(test_files, source_files),
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
