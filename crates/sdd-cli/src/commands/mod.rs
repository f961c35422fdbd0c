//! Handlers for the two modes.  Each translates answers into a core
//! `Config`, runs one service, and prints its report.

pub mod init;
pub mod new;

use sdd_adapters::{DirectoryTemplates, EmbeddedTemplates};
use sdd_core::application::ports::TemplateSource;
use tracing::debug;

use crate::config::AppConfig;

/// The bundled corpus, or the directory configured under `[templates]`.
fn template_source(config: &AppConfig) -> Box<dyn TemplateSource> {
    match &config.templates.directory {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using templates from disk");
            Box::new(DirectoryTemplates::new(dir))
        }
        None => Box::new(EmbeddedTemplates::new()),
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
