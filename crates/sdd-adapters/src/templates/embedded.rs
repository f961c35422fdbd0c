//! Template corpus compiled into the binary.

use rust_embed::Embed;
use tracing::{debug, instrument};

use sdd_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::{TemplateFile, TemplateTree},
    error::SddResult,
};

use super::normalize_path;

#[derive(Embed)]
#[folder = "../../template/"]
struct Corpus;

/// The corpus bundled at compile time from `template/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for EmbeddedTemplates {
    #[instrument(skip_all)]
    fn load(&self) -> SddResult<TemplateTree> {
        let mut files = Vec::new();
        for path in Corpus::iter() {
            let Some(file) = <Corpus as Embed>::get(&path) else {
                continue;
            };
            let content = String::from_utf8(file.data.into_owned()).map_err(|e| {
                ApplicationError::TemplateSource {
                    reason: format!("{path} is not valid UTF-8: {e}"),
                }
            })?;
            files.push(TemplateFile::new(normalize_path(&path), content));
        }
        debug!(count = files.len(), "Loaded embedded corpus");
        Ok(files.into_iter().collect())
    }
}
