//! Prompt descriptions shared by every `Prompter` implementation.
//!
//! Validation lives here rather than in the adapters so that the terminal and
//! scripted prompters accept exactly the same answers.

use std::fmt;

use regex::Regex;

/// Custom check run on a free-text answer after the pattern matched.
pub type TextValidator = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Custom check run on a numeric answer.
pub type NumberValidator = dyn Fn(f64) -> Result<(), String> + Send + Sync;

/// A free-text question.
pub struct TextPrompt {
    question: String,
    default: Option<String>,
    pattern: Option<&'static Regex>,
    allow_empty: bool,
    validator: Option<TextValidator>,
}

impl TextPrompt {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            default: None,
            pattern: None,
            allow_empty: false,
            validator: None,
        }
    }

    /// Answer used when the user submits nothing.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_pattern(mut self, pattern: &'static Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn default_answer(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Turn raw input into the accepted answer, or explain why it was rejected.
    ///
    /// Order: default for blank input, emptiness, pattern, custom validator.
    pub fn resolve(&self, input: &str) -> Result<String, String> {
        let input = input.trim();
        let value = if input.is_empty() {
            self.default.as_deref().unwrap_or_default()
        } else {
            input
        };

        if value.is_empty() {
            return if self.allow_empty {
                Ok(String::new())
            } else {
                Err("A value is required".into())
            };
        }

        if let Some(pattern) = self.pattern {
            if !pattern.is_match(value) {
                return Err(format!("'{value}' is not a valid answer for {}", self.question));
            }
        }

        if let Some(validator) = &self.validator {
            validator(value)?;
        }

        Ok(value.to_string())
    }
}

impl fmt::Debug for TextPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextPrompt")
            .field("question", &self.question)
            .field("default", &self.default)
            .field("pattern", &self.pattern.map(Regex::as_str))
            .field("allow_empty", &self.allow_empty)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Which of a toggle's two options the user picked.
///
/// A toggle can only ever yield one of the options it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleSide {
    First,
    Second,
}

impl ToggleSide {
    pub fn pick<'a>(self, options: [&'a str; 2]) -> &'a str {
        match self {
            Self::First => options[0],
            Self::Second => options[1],
        }
    }

    /// Side whose option equals `answer`, if any.
    pub fn of(answer: &str, options: [&str; 2]) -> Option<Self> {
        if answer == options[0] {
            Some(Self::First)
        } else if answer == options[1] {
            Some(Self::Second)
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// How many choices a multi-select must pick, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionBounds {
    min: usize,
    max: Option<usize>,
}

impl SelectionBounds {
    /// Any number of choices, including none.
    pub const ANY: Self = Self { min: 0, max: None };

    /// A `max` below `min` is raised to `min`.
    pub fn new(min: usize, max: Option<usize>) -> Self {
        Self {
            min,
            max: max.map(|m| m.max(min)),
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Whether `available` choices can satisfy the lower bound at all.
    pub fn satisfiable(&self, available: usize) -> bool {
        self.min <= available
    }

    pub fn check(&self, picked: usize) -> Result<(), String> {
        if picked < self.min {
            return Err(format!("pick at least {}", self.min));
        }
        match self.max {
            Some(max) if picked > max => Err(format!("pick at most {max}")),
            _ => Ok(()),
        }
    }
}
