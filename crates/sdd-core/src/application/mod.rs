//! Application layer.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, RetrofitService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Report**: What a run did, returned by value
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{GenerateService, RetrofitService};

pub use ports::{Filesystem, ProjectScanner, TemplateSource};

pub use error::ApplicationError;
pub use report::{MaterializeReport, SkippedPath};
