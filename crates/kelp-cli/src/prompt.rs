//! Interactive prompter backed by `dialoguer`.

use std::path::Path;

use console::Term;
use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, Select, theme::ColorfulTheme};
use kelp_adapters::OverwritePolicy;
use kelp_core::{
    application::{
        ApplicationError,
        ports::{NumberValidator, Prompter, SelectionBounds, TextPrompt, ToggleSide},
    },
    error::{KelpError, KelpResult},
};
use tracing::debug;

/// Asks on the terminal. Rejected answers are re-asked in place.
///
/// Any terminal failure (including a closed stdin) cancels the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter {
    overwrite: OverwritePolicy,
}

impl TerminalPrompter {
    pub fn new(overwrite: OverwritePolicy) -> Self {
        Self { overwrite }
    }
}

fn cancelled(err: dialoguer::Error) -> KelpError {
    ApplicationError::PromptCancelled {
        reason: err.to_string(),
    }
    .into()
}

impl Prompter for TerminalPrompter {
    fn text(&self, prompt: &TextPrompt) -> KelpResult<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt.question())
            .allow_empty(true)
            .validate_with(|raw: &String| prompt.resolve(raw).map(|_| ()));
        if let Some(default) = prompt.default_answer() {
            input = input.default(default.to_string());
        }

        let raw = input.interact_text().map_err(cancelled)?;
        let value = prompt.resolve(&raw).map_err(|reason| KelpError::Internal {
            message: format!("accepted answer failed validation: {reason}"),
        })?;
        debug!(question = prompt.question(), %value, "answered");
        Ok(value)
    }

    fn confirm(&self, question: &str) -> KelpResult<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(cancelled)
    }

    fn toggle(&self, question: &str, options: [&str; 2]) -> KelpResult<ToggleSide> {
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .items(&options[..])
            .default(0)
            .interact()
            .map_err(cancelled)?;
        Ok(if index == 0 {
            ToggleSide::First
        } else {
            ToggleSide::Second
        })
    }

    fn numeral(&self, question: &str, validator: &NumberValidator) -> KelpResult<f64> {
        Input::<f64>::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .validate_with(|n: &f64| validator(*n))
            .interact_text()
            .map_err(cancelled)
    }

    fn select(&self, question: &str, choices: &[&str]) -> KelpResult<usize> {
        FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .items(choices)
            .default(0)
            .interact()
            .map_err(cancelled)
    }

    fn multi_select(
        &self,
        question: &str,
        choices: &[&str],
        bounds: SelectionBounds,
    ) -> KelpResult<Vec<usize>> {
        if !bounds.satisfiable(choices.len()) {
            return Err(KelpError::Configuration {
                message: format!(
                    "'{question}' needs at least {} choices but offers {}",
                    bounds.min(),
                    choices.len()
                ),
            });
        }

        let theme = ColorfulTheme::default();
        loop {
            let mut picked = MultiSelect::with_theme(&theme)
                .with_prompt(question)
                .items(choices)
                .interact()
                .map_err(cancelled)?;
            picked.sort_unstable();
            match bounds.check(picked.len()) {
                Ok(()) => return Ok(picked),
                Err(reason) => {
                    let _ = Term::stderr().write_line(&reason);
                }
            }
        }
    }

    fn confirm_overwrite(&self, path: &Path) -> KelpResult<bool> {
        match self.overwrite {
            OverwritePolicy::Always => Ok(true),
            OverwritePolicy::Never => Ok(false),
            OverwritePolicy::Ask => {
                self.confirm(&format!("{} already exists. Overwrite?", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsatisfiable_multi_select_fails_before_asking() {
        let err = TerminalPrompter::default()
            .multi_select("Tooling", &["eslint"], SelectionBounds::new(2, None))
            .unwrap_err();
        assert!(matches!(err, KelpError::Configuration { .. }));
    }

    #[test]
    fn fixed_policies_do_not_touch_the_terminal() {
        let path = Path::new("package.json");
        assert!(TerminalPrompter::new(OverwritePolicy::Always)
            .confirm_overwrite(path)
            .unwrap());
        assert!(!TerminalPrompter::new(OverwritePolicy::Never)
            .confirm_overwrite(path)
            .unwrap());
    }
}
