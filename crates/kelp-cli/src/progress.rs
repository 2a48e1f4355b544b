//! Spinner shown while an external command runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use kelp_core::{
    application::ports::{CommandOutput, CommandRunner},
    error::KelpResult,
};

/// Wraps a runner with an `indicatif` spinner on stderr.
#[derive(Debug, Clone)]
pub struct SpinnerRunner<R> {
    inner: R,
    hidden: bool,
}

impl<R: CommandRunner> SpinnerRunner<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hidden: false,
        }
    }

    /// No spinner (quiet or machine-readable output).
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    fn spinner(&self, command: &str) -> ProgressBar {
        if self.hidden {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})") {
            bar.set_style(style);
        }
        bar.set_message(format!("Running {command}"));
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

impl<R: CommandRunner> CommandRunner for SpinnerRunner<R> {
    fn run(&self, command: &str) -> KelpResult<CommandOutput> {
        let bar = self.spinner(command);
        let result = self.inner.run(command);
        bar.finish_and_clear();
        result
    }
}
