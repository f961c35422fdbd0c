// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer.
//!
//! Pure logic only: preset catalog, scan model and detection rules,
//! configuration, placeholder rendering and the text synthesized for a
//! retrofit. Reading and writing files happens behind the ports defined in
//! the application layer.
//!
//! - **No I/O**: detection rules take manifest contents, never paths
//! - **No async**: everything is synchronous
//! - **Immutable values**: `Config` and `ScanResult` are built once and shared

pub mod config;
pub mod context;
pub mod detection;
pub mod error;
pub mod placeholder;
pub mod presets;
pub mod project_structure;
pub mod scan;
pub mod standards;
pub mod template;

pub use config::{
    BackendChoice, Config, ConfigBuilder, DataModel, DataModelFormat, FrontendChoice, Retrofit,
    SprintWindow,
};
pub use error::{DomainError, ErrorCategory};
pub use placeholder::{
    Placeholder, RenderContext, Rendered, Section, SectionAction, Value,
};
pub use presets::{AiTools, AutonomyLevel, BackendStack, Branching, FrontendStack, ProjectType};
pub use project_structure::{FileContent, FileToWrite, ProjectStructure};
pub use scan::{
    ArchitecturePattern, BackendScan, Coverage, E2eFramework, ExistingDocs, FrontendScan,
    Language, ScanResult, SourceStructure, TestFramework, TestScan,
};
pub use template::{TemplateFile, TemplateTree};
