//! The surface a host scaffolding CLI calls.
//!
//! `generator` scaffolds a fresh project, `use_support` adds TypeScript to an
//! existing one. Both run the same steps; overwrites are always confirmed.

use tracing::debug;

use crate::application::{GenerationMode, GenerationReport, GenerationRequest, GenerationService, Host};
use crate::error::KelpResult;

/// Lines the host merges into the project's `.gitignore`.
pub const GITIGNORE_FRAGMENT: &str = "# TypeScript build output\ndist/\nnode_modules/\n";

/// Scaffold a fresh project.
pub fn generator(host: Host, request: GenerationRequest) -> KelpResult<GenerationReport> {
    GenerationService::new(host).generate(&request.with_mode(GenerationMode::Fresh))
}

/// Add TypeScript support to an existing project.
pub fn use_support(host: Host, request: GenerationRequest) -> KelpResult<GenerationReport> {
    GenerationService::new(host).generate(&request.with_mode(GenerationMode::AddSupport))
}

/// Command registration hook. This plugin contributes no commands.
pub fn commands() {
    debug!("no plugin commands to register");
}
