//! SDD Core
//!
//! Domain and application layers for `create-sdd-project`, which scaffolds a
//! new project with the SDD DevFlow workflow or adds it to an existing one.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        sdd-cli (create-sdd-project)     │
//! │   (arguments, wizard, output, config)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerateService, RetrofitService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, TemplateSource, Scanner)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      sdd-adapters (Infrastructure)      │
//! │ (LocalFilesystem, EmbeddedTemplates,    │
//! │  DiskScanner)                           │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Presets, ScanResult, Config,          │
//! │   RenderContext)                        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sdd_core::application::GenerateService;
//! use sdd_core::domain::Config;
//!
//! let config = Config::new_project("my-app", "./my-app", today)?;
//! let service = GenerateService::new(templates, filesystem);
//! let report = service.generate(&config)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;
