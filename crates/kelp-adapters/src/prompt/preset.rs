//! Preset answers loaded from a JSON file.
//!
//! ```json
//! {
//!     "description": "A tiny library",
//!     "entryPoint": "index.ts",
//!     "license": "MIT",
//!     "repository": "octocat/my-lib",
//!     "target": "ES2022",
//!     "module": "commonjs"
//! }
//! ```
//!
//! Every field is optional. Missing fields take the prompt's default; a
//! missing `repository` answers "no" to the repository question.

use std::path::Path;

use kelp_core::{
    domain::{EntryPoint, ModuleKind},
    error::{KelpError, KelpResult},
};
use serde::Deserialize;

use super::scripted::{ScriptedAnswer, ScriptedPrompter};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PresetAnswers {
    pub description: Option<String>,
    pub entry_point: Option<EntryPoint>,
    pub license: Option<String>,
    pub repository: Option<String>,
    pub target: Option<String>,
    pub module: Option<ModuleKind>,
}

impl PresetAnswers {
    pub fn from_json(json: &str) -> KelpResult<Self> {
        serde_json::from_str(json).map_err(|e| KelpError::Configuration {
            message: format!("invalid answers file: {e}"),
        })
    }

    pub fn from_file(path: &Path) -> KelpResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| KelpError::Configuration {
            message: format!("cannot read answers file {}: {e}", path.display()),
        })?;
        Self::from_json(&json)
    }

    /// Answers in the order the interview asks for them.
    pub fn into_queue(self) -> Vec<ScriptedAnswer> {
        let mut queue = vec![
            ScriptedAnswer::Text(self.description.unwrap_or_default()),
            ScriptedAnswer::text(self.entry_point.unwrap_or(EntryPoint::Main).as_str()),
            ScriptedAnswer::Text(self.license.unwrap_or_default()),
            ScriptedAnswer::Confirm(self.repository.is_some()),
        ];
        if let Some(repository) = self.repository {
            queue.push(ScriptedAnswer::Text(repository));
        }
        queue.push(ScriptedAnswer::Text(self.target.unwrap_or_default()));
        queue.push(ScriptedAnswer::text(
            self.module.unwrap_or(ModuleKind::NodeNext).as_str(),
        ));
        queue
    }

    pub fn into_prompter(self) -> ScriptedPrompter {
        ScriptedPrompter::new(self.into_queue())
    }
}
