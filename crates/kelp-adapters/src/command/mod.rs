//! Command runner adapters.

mod recording;
mod shell;

pub use recording::RecordingRunner;
pub use shell::ShellRunner;
