//! Application ports (traits) for the host's capabilities.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kelp-adapters` (and the
//! terminal prompter in `kelp-cli`) implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: raw file primitives, only reached through `ProtectedFs`
//!   - `Prompter`: text / confirm / toggle / numeral / select / multi-select prompts
//!   - `CommandRunner`: shell commands such as the dependency install
//!   - `ScriptPatcher`: edits to the host's named automation scripts
//!
//! - **Driving (Input) Ports**: Called by the host, implemented by application
//!   - (`crate::plugin` is the surface the host calls)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, Filesystem, NumberValidator, Prompter, ScriptPatcher,
    SelectionBounds, TextPrompt, TextValidator, ToggleSide,
};

#[cfg(test)]
pub use output::MockCommandRunner;
