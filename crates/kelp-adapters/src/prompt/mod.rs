//! Non-interactive prompter adapters.
//!
//! The interactive terminal prompter lives in `kelp-cli`.

mod preset;
mod scripted;

pub use preset::PresetAnswers;
pub use scripted::{OverwritePolicy, ScriptedAnswer, ScriptedPrompter};
