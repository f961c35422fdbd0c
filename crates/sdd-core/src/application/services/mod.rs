//! Application services - orchestrate use cases.
//!
//! One service per materialization mode: a new project, or the workflow
//! added to an existing one.

pub mod generate_service;
pub(crate) mod materialize;
pub mod retrofit_service;

pub use generate_service::GenerateService;
pub use retrofit_service::RetrofitService;
