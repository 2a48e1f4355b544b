pub mod answers;
pub mod common;
pub mod host_script;
pub mod identity;
pub mod manifest;
pub mod patch_plan;

pub use answers::Answers;
pub use common::ProjectPath;
pub use host_script::{HostScript, PLACEHOLDER_MARKER};
pub use identity::IdentityContext;
pub use manifest::{CompilerConfig, ManifestBuilder, ProjectManifest, RepositoryLinks};
pub use patch_plan::{PatchStep, ScriptPatch, patch_plan};
