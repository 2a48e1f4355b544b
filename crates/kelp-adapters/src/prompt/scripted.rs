//! Prompter that answers from a prepared queue.
//!
//! Used for non-interactive runs (`--answers`) and in tests. Invalid entries
//! are logged and skipped, the way a user would retype them; an empty queue
//! cancels the run.

use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use kelp_core::{
    application::{
        ApplicationError,
        ports::{NumberValidator, Prompter, SelectionBounds, TextPrompt, ToggleSide},
    },
    domain::patterns,
    error::{KelpError, KelpResult},
};
use tracing::{debug, warn};

/// One queued answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedAnswer {
    /// Answers text, toggle and select prompts.
    Text(String),
    Confirm(bool),
    Number(f64),
    /// Answers multi-select prompts by choice name.
    Choices(Vec<String>),
}

impl ScriptedAnswer {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn choices<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choices(names.into_iter().map(Into::into).collect())
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Confirm(_) => "confirm",
            Self::Number(_) => "number",
            Self::Choices(_) => "choices",
        }
    }
}

/// What to do when a generated file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Take the next queued confirm answer.
    #[default]
    Ask,
    Always,
    Never,
}

impl OverwritePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverwritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "always" | "yes" => Ok(Self::Always),
            "never" | "no" => Ok(Self::Never),
            _ => Err(format!("Unknown overwrite policy: {s} (expected ask, always or never)")),
        }
    }
}

/// Clones share the queue and the transcript.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    queue: Arc<Mutex<VecDeque<ScriptedAnswer>>>,
    transcript: Arc<Mutex<Vec<String>>>,
    overwrite: OverwritePolicy,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            queue: Arc::new(Mutex::new(answers.into_iter().collect())),
            ..Self::default()
        }
    }

    pub fn with_overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    /// Every question asked so far, in order.
    pub fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    fn next(&self, question: &str) -> KelpResult<ScriptedAnswer> {
        self.transcript
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(question.to_string());

        let answer = self
            .queue
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .pop_front();

        answer.ok_or_else(|| {
            ApplicationError::PromptCancelled {
                reason: format!("no answer provided for '{question}'"),
            }
            .into()
        })
    }

    fn mismatch(question: &str, expected: &str, got: &ScriptedAnswer) -> KelpError {
        KelpError::Configuration {
            message: format!(
                "'{question}' needs a {expected} answer, but the next answer is {}",
                got.kind()
            ),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, prompt: &TextPrompt) -> KelpResult<String> {
        loop {
            match self.next(prompt.question())? {
                ScriptedAnswer::Text(raw) => match prompt.resolve(&raw) {
                    Ok(value) => {
                        debug!(question = prompt.question(), %value, "answered");
                        return Ok(value);
                    }
                    Err(reason) => warn!(question = prompt.question(), %reason, "rejected answer"),
                },
                other => return Err(Self::mismatch(prompt.question(), "text", &other)),
            }
        }
    }

    /// Also takes `y` / `yes` / `n` / `no` as text.
    fn confirm(&self, question: &str) -> KelpResult<bool> {
        loop {
            match self.next(question)? {
                ScriptedAnswer::Confirm(yes) => return Ok(yes),
                ScriptedAnswer::Text(raw) if patterns::CONFIRMATION.is_match(raw.trim()) => {
                    return Ok(raw.trim().to_ascii_lowercase().starts_with('y'));
                }
                ScriptedAnswer::Text(raw) => warn!(question, %raw, "expected yes or no"),
                other => return Err(Self::mismatch(question, "confirm", &other)),
            }
        }
    }

    fn toggle(&self, question: &str, options: [&str; 2]) -> KelpResult<ToggleSide> {
        loop {
            match self.next(question)? {
                ScriptedAnswer::Text(raw) => match ToggleSide::of(raw.trim(), options) {
                    Some(side) => return Ok(side),
                    None => warn!(question, %raw, "not one of {} / {}", options[0], options[1]),
                },
                other => return Err(Self::mismatch(question, "text", &other)),
            }
        }
    }

    fn numeral(&self, question: &str, validator: &NumberValidator) -> KelpResult<f64> {
        loop {
            match self.next(question)? {
                ScriptedAnswer::Number(n) => match validator(n) {
                    Ok(()) => return Ok(n),
                    Err(reason) => warn!(question, n, %reason, "rejected answer"),
                },
                other => return Err(Self::mismatch(question, "number", &other)),
            }
        }
    }

    fn select(&self, question: &str, choices: &[&str]) -> KelpResult<usize> {
        loop {
            match self.next(question)? {
                ScriptedAnswer::Text(raw) => {
                    match choices.iter().position(|c| *c == raw.trim()) {
                        Some(index) => return Ok(index),
                        None => warn!(question, %raw, "not one of the choices"),
                    }
                }
                other => return Err(Self::mismatch(question, "text", &other)),
            }
        }
    }

    fn multi_select(
        &self,
        question: &str,
        choices: &[&str],
        bounds: SelectionBounds,
    ) -> KelpResult<Vec<usize>> {
        loop {
            match self.next(question)? {
                ScriptedAnswer::Choices(names) => {
                    let mut picked = Vec::with_capacity(names.len());
                    for name in &names {
                        match choices.iter().position(|c| *c == name.trim()) {
                            Some(index) => picked.push(index),
                            None => warn!(question, %name, "not one of the choices"),
                        }
                    }
                    picked.sort_unstable();
                    picked.dedup();
                    if picked.len() != names.len() {
                        continue;
                    }
                    match bounds.check(picked.len()) {
                        Ok(()) => return Ok(picked),
                        Err(reason) => warn!(question, %reason, "rejected answer"),
                    }
                }
                other => return Err(Self::mismatch(question, "choices", &other)),
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
