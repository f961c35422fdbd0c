//! What a materialization run did, returned by value from each service.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    /// Checklist lines, in execution order.
    pub steps: Vec<String>,
    /// Relative paths written this run.
    pub written: Vec<String>,
    pub skipped: Vec<SkippedPath>,
    pub notes: Vec<String>,
    pub next_steps: Vec<String>,
}

impl MaterializeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn step(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(step = %line);
        self.steps.push(line);
    }

    pub(crate) fn skip(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedPath {
            path: path.into(),
            reason: reason.into(),
        });
    }

    pub fn was_written(&self, path: &str) -> bool {
        self.written.iter().any(|p| p == path)
    }

    pub fn was_skipped(&self, path: &str) -> bool {
        self.skipped.iter().any(|s| s.path == path)
    }
}
