//! Rendering and writing shared by both materialization services.

use tracing::{debug, warn};

use crate::application::ApplicationError;
use crate::application::ports::Filesystem;
use crate::application::report::MaterializeReport;
use crate::domain::template::{self, TemplateTree};
use crate::domain::{FileContent, ProjectStructure, RenderContext};
use crate::error::SddResult;

pub(crate) const ALREADY_EXISTS: &str = "already exists";

/// Template text for `path`, rendered when the file is stamped.
pub(crate) fn render_file(
    tree: &TemplateTree,
    path: &str,
    ctx: &RenderContext,
) -> SddResult<String> {
    let content = tree
        .get(path)
        .ok_or_else(|| ApplicationError::TemplateMissing {
            path: path.to_string(),
        })?;

    if !template::is_stamped(path) {
        return Ok(content.to_string());
    }

    let rendered = ctx.render(content);
    if !rendered.unresolved.is_empty() {
        warn!(
            path,
            markers = ?rendered.unresolved,
            "Template markers left unresolved"
        );
    }
    Ok(rendered.content)
}

/// How to treat a destination that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Existing {
    Overwrite,
    Skip,
}

/// Write every planned file, recording each outcome in `report`.
///
/// Errors propagate immediately. Files written before the failure stay.
pub(crate) fn write_structure(
    fs: &dyn Filesystem,
    structure: &ProjectStructure,
    existing: Existing,
    report: &mut MaterializeReport,
) -> SddResult<()> {
    structure.validate()?;
    fs.create_dir_all(structure.root())?;

    for file in structure.files() {
        let dest = file.destination(structure.root());
        if existing == Existing::Skip && fs.exists(&dest) {
            debug!(path = %file.path, "Skipping existing file");
            report.skip(&file.path, ALREADY_EXISTS);
            continue;
        }

        if let FileContent::CopyFrom(source) = &file.content {
            if !fs.exists(source) {
                report.skip(&file.path, format!("{} not found", source.display()));
                continue;
            }
        }

        if let Some(parent) = dest.parent() {
            fs.create_dir_all(parent)?;
        }
        match &file.content {
            FileContent::Text(text) => fs.write_file(&dest, text)?,
            FileContent::CopyFrom(source) => fs.copy_file(source, &dest)?,
        }
        if file.executable {
            fs.set_permissions(&dest, true)?;
        }
        report.written.push(file.path.clone());
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::testing::*;
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::TemplateFile;
    use crate::domain::placeholder::Placeholder;
    use crate::error::SddError;

    #[test]
    fn stamped_files_render_and_others_copy_verbatim() {
        let tree: TemplateTree = [
            TemplateFile::new("AGENTS.md", "# {{PROJECT_NAME}}\n"),
            TemplateFile::new(".gemini/commands/plan.toml", "prompt = \"{{args}}\"\n"),
        ]
        .into_iter()
        .collect();
        let mut ctx = RenderContext::new();
        ctx.text(Placeholder::ProjectName, "acme");

        assert_eq!(render_file(&tree, "AGENTS.md", &ctx).unwrap(), "# acme\n");
        assert_eq!(
            render_file(&tree, ".gemini/commands/plan.toml", &ctx).unwrap(),
            "prompt = \"{{args}}\"\n"
        );
        assert!(matches!(
            render_file(&tree, "missing.md", &ctx),
            Err(SddError::Application(ApplicationError::TemplateMissing { .. }))
        ));
    }

    #[test]
    fn skip_mode_leaves_existing_files_alone() {
        let files = Files::default();
        files
            .lock()
            .unwrap()
            .insert(PathBuf::from("/p/AGENTS.md"), "mine".into());
        let fs = recording_fs(&files);

        let structure = ProjectStructure::new("/p")
            .with_file("AGENTS.md", "theirs")
            .with_file("bugs.md", "new");
        let mut report = MaterializeReport::new();
        write_structure(&fs, &structure, Existing::Skip, &mut report).unwrap();

        assert_eq!(read(&files, "/p/AGENTS.md").as_deref(), Some("mine"));
        assert_eq!(report.written, vec!["bugs.md"]);
        assert_eq!(report.skipped[0].reason, ALREADY_EXISTS);
    }

    #[test]
    fn missing_copy_source_is_skipped_with_reason() {
        let files = Files::default();
        let fs = recording_fs(&files);
        let mut structure = ProjectStructure::new("/p");
        structure.add_copy("docs/specs/api-spec.yaml", "/p/openapi.yaml");

        let mut report = MaterializeReport::new();
        write_structure(&fs, &structure, Existing::Skip, &mut report).unwrap();
        assert!(report.written.is_empty());
        assert!(report.skipped[0].reason.ends_with("not found"));
    }

    #[test]
    fn write_errors_propagate() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().returning(|p: &Path, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });

        let structure = ProjectStructure::new("/p").with_file("AGENTS.md", "x");
        let mut report = MaterializeReport::new();
        let err = write_structure(&fs, &structure, Existing::Overwrite, &mut report).unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert!(report.written.is_empty());
    }

    #[test]
    fn hook_scripts_get_the_executable_bit() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .withf(|p: &Path, executable: &bool| p.ends_with("quick-scan.sh") && *executable)
            .times(1)
            .returning(|_, _| Ok(()));

        let structure = ProjectStructure::new("/p")
            .with_file(".claude/hooks/quick-scan.sh", "#!/bin/sh\n")
            .with_file("CLAUDE.md", "# Claude\n");
        let mut report = MaterializeReport::new();
        write_structure(&fs, &structure, Existing::Overwrite, &mut report).unwrap();
        assert_eq!(report.written.len(), 2);
    }
}
