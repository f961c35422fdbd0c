// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("unknown {kind} '{value}'")]
    UnknownPreset { kind: &'static str, value: String },

    #[error("autonomy level {level} does not exist (expected 1-4)")]
    InvalidAutonomyLevel { level: u8 },

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownPreset { kind, value } => {
                let mut out = vec![format!("'{value}' is not a known {kind}")];
                let known = known_keys(kind);
                if !known.is_empty() {
                    out.push(format!("Known values: {}", known.join(", ")));
                }
                out
            }
            Self::InvalidAutonomyLevel { .. } => vec![
                "Autonomy levels:".into(),
                "  1 - Full Control".into(),
                "  2 - Trusted".into(),
                "  3 - Autopilot".into(),
                "  4 - Full Auto".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Use a plain directory name such as my-app".into(),
                "Names cannot be empty or start with '.'".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{field}'")]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownPreset { .. }
            | Self::InvalidAutonomyLevel { .. }
            | Self::InvalidProjectName { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

fn known_keys(kind: &str) -> Vec<&'static str> {
    use crate::domain::presets::{
        AiTools, BACKEND_STACKS, Branching, FRONTEND_STACKS, ProjectType,
    };

    match kind {
        "project type" => ProjectType::ALL.iter().map(|t| t.as_str()).collect(),
        "backend stack" => BACKEND_STACKS.iter().map(|s| s.key).collect(),
        "frontend stack" => FRONTEND_STACKS.iter().map(|s| s.key).collect(),
        "AI tool selection" => AiTools::ALL.iter().map(|t| t.as_str()).collect(),
        "branching strategy" => Branching::ALL.iter().map(|b| b.as_str()).collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_backend_stack_lists_known_keys() {
        let err = DomainError::UnknownPreset {
            kind: "backend stack",
            value: "rails".into(),
        };
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("express-prisma-pg")));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn autonomy_suggestions_name_every_level() {
        let err = DomainError::InvalidAutonomyLevel { level: 9 };
        let joined = err.suggestions().join("\n");
        assert!(joined.contains("Full Control"));
        assert!(joined.contains("Full Auto"));
    }
}
