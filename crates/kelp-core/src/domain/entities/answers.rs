use serde::Serialize;

use crate::domain::value_objects::{CompilerTarget, EntryPoint, License, ModuleKind, Repository};

/// Everything the user answered during one generation run.
///
/// `repository` is `Some` iff the user said they own a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answers {
    pub description: String,
    pub entry_point: EntryPoint,
    pub license: License,
    pub repository: Option<Repository>,
    pub compiler_target: CompilerTarget,
    pub module_kind: ModuleKind,
}
