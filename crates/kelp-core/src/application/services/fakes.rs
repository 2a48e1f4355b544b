//! Minimal in-crate port doubles for unit tests.
//!
//! Integration tests in `tests/` use the real in-memory adapters from
//! `kelp-adapters` instead.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ApplicationError;
use crate::application::ports::{
    Filesystem, NumberValidator, Prompter, SelectionBounds, TextPrompt, ToggleSide,
};
use crate::error::KelpResult;

#[derive(Default)]
pub struct FakeFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl FakeFs {
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.lock().unwrap().contains(path.as_ref())
    }
}

impl Filesystem for FakeFs {
    fn create_dir_all(&self, path: &Path) -> KelpResult<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> KelpResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> KelpResult<()> {
        self.files
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> KelpResult<String> {
        self.content(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }
}

/// Answers every question from a queue of raw strings.
///
/// Text answers go through `TextPrompt::resolve`; a rejected entry is
/// consumed and the next one is tried, like a user retyping. An empty queue
/// cancels.
#[derive(Default)]
pub struct QueuePrompter {
    answers: Mutex<VecDeque<String>>,
    pub asked: Mutex<Vec<String>>,
}

impl QueuePrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    fn next(&self, question: &str) -> KelpResult<String> {
        self.asked.lock().unwrap().push(question.to_string());
        self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            ApplicationError::PromptCancelled {
                reason: format!("no answer for '{question}'"),
            }
            .into()
        })
    }
}

impl Prompter for QueuePrompter {
    fn text(&self, prompt: &TextPrompt) -> KelpResult<String> {
        loop {
            let raw = self.next(prompt.question())?;
            if let Ok(value) = prompt.resolve(&raw) {
                return Ok(value);
            }
        }
    }

    fn confirm(&self, question: &str) -> KelpResult<bool> {
        Ok(matches!(self.next(question)?.as_str(), "y" | "yes" | "true"))
    }

    fn toggle(&self, question: &str, options: [&str; 2]) -> KelpResult<ToggleSide> {
        loop {
            let raw = self.next(question)?;
            if let Some(side) = ToggleSide::of(&raw, options) {
                return Ok(side);
            }
        }
    }

    fn numeral(&self, question: &str, validator: &NumberValidator) -> KelpResult<f64> {
        loop {
            let raw = self.next(question)?;
            if let Ok(n) = raw.parse::<f64>() {
                if validator(n).is_ok() {
                    return Ok(n);
                }
            }
        }
    }

    fn select(&self, question: &str, choices: &[&str]) -> KelpResult<usize> {
        loop {
            let raw = self.next(question)?;
            if let Some(i) = choices.iter().position(|c| *c == raw) {
                return Ok(i);
            }
        }
    }

    /// Answers are comma-separated choice names.
    fn multi_select(
        &self,
        question: &str,
        choices: &[&str],
        bounds: SelectionBounds,
    ) -> KelpResult<Vec<usize>> {
        loop {
            let raw = self.next(question)?;
            let picked: Option<BTreeSet<usize>> = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| choices.iter().position(|c| *c == name))
                .collect();
            if let Some(picked) = picked.filter(|p| bounds.check(p.len()).is_ok()) {
                return Ok(picked.into_iter().collect());
            }
        }
    }
}
