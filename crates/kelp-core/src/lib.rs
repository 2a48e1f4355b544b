//! kelp core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers of kelp, a plugin
//! that generates TypeScript project boilerplate for a script-driven host.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      kelp-cli / host (plugin surface)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, AnswerCollector,   │
//! │   ProtectedFs)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Prompter, Filesystem, CommandRunner,   │
//! │  ScriptPatcher)                         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      kelp-adapters (Infrastructure)     │
//! └─────────────────────────────────────────┘
//!
//!   Domain layer (pure): identifiers, answers, manifest builder,
//!   host script editing, patch plan
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kelp_core::prelude::*;
//!
//! let host = Host { prompter, filesystem, runner, scripts };
//! let request = GenerationRequest::new("./my-lib", ProjectIdentifier::parse("my-lib")?);
//! let report = kelp_core::plugin::generator(host, request)?;
//! println!("edit {}", report.entry_source());
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod plugin;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationMode, GenerationReport, GenerationRequest, GenerationService, Host,
        InstallStatus, WriteOutcome,
        ports::{CommandOutput, CommandRunner, Filesystem, Prompter, ScriptPatcher},
    };
    pub use crate::domain::{IdentityContext, ProjectIdentifier, ScriptName};
    pub use crate::error::{KelpError, KelpResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
