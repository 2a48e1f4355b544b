// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for kelp.
//!
//! This module contains pure logic only. All I/O (files, prompts, commands,
//! host scripts on disk) is reached through ports defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Validated values**: Identifiers, licenses, targets and script names
//!   can only be built through their parsers
//! - **Deterministic**: `ManifestBuilder` and `patch_plan` are pure functions
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod patterns;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    Answers, CompilerConfig, HostScript, IdentityContext, ManifestBuilder, PLACEHOLDER_MARKER,
    PatchStep, ProjectManifest, ProjectPath, RepositoryLinks, ScriptPatch, patch_plan,
    manifest::to_json_pretty,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    CompilerTarget, EntryPoint, License, ModuleKind, ProjectIdentifier, Repository, ScriptName,
};
