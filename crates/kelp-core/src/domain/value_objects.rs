//! Domain value objects: identifiers, answer choices, and host script names.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity. Each one is
//! only constructible through a validating parser, so holding a value is
//! proof that it satisfied its pattern. Closed choices (`EntryPoint`,
//! `ModuleKind`) are enums, which makes "a third value" unrepresentable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, patterns};

// ── ProjectIdentifier ─────────────────────────────────────────────────────────

/// The package identifier chosen when the host project was created.
///
/// Used verbatim as the manifest `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectIdentifier(String);

impl ProjectIdentifier {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::InvalidIdentifier {
                value,
                reason: "identifier cannot be empty".into(),
            });
        }
        if !patterns::IDENTIFIER.is_match(&value) {
            return Err(DomainError::InvalidIdentifier {
                value,
                reason: "contains characters outside a-z, A-Z, 0-9, '-', '_', '@', '~', '.', '/'"
                    .into(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectIdentifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── EntryPoint ────────────────────────────────────────────────────────────────

/// The TypeScript source file that becomes the package entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryPoint {
    #[serde(rename = "main.ts")]
    Main,
    #[serde(rename = "index.ts")]
    Index,
}

impl EntryPoint {
    /// Both choices, in the order they are offered to the user.
    pub const OPTIONS: [&'static str; 2] = ["main.ts", "index.ts"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main.ts",
            Self::Index => "index.ts",
        }
    }

    /// File name without the `.ts` extension.
    pub const fn stem(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Index => "index",
        }
    }

    /// Path of the compiled JavaScript file, relative to the project root.
    pub fn compiled_path(&self) -> String {
        format!("dist/{}.js", self.stem())
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryPoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main.ts" => Ok(Self::Main),
            "index.ts" => Ok(Self::Index),
            other => Err(DomainError::InvalidAnswer {
                field: "entry point",
                value: other.into(),
            }),
        }
    }
}

// ── ModuleKind ────────────────────────────────────────────────────────────────

/// Module system emitted by the TypeScript compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    NodeNext,
    #[serde(rename = "commonjs")]
    CommonJs,
}

impl ModuleKind {
    pub const OPTIONS: [&'static str; 2] = ["NodeNext", "commonjs"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NodeNext => "NodeNext",
            Self::CommonJs => "commonjs",
        }
    }

    /// `moduleResolution` only makes sense alongside the NodeNext module system.
    pub const fn resolution(&self) -> Option<&'static str> {
        match self {
            Self::NodeNext => Some("NodeNext"),
            Self::CommonJs => None,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NodeNext" => Ok(Self::NodeNext),
            "commonjs" => Ok(Self::CommonJs),
            other => Err(DomainError::InvalidAnswer {
                field: "module",
                value: other.into(),
            }),
        }
    }
}

// ── License ───────────────────────────────────────────────────────────────────

/// An SPDX expression, `UNKNOWN`, or `SEE LICENSE IN <file>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct License(String);

impl License {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for License {
    fn default() -> Self {
        Self("MIT".into())
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for License {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if patterns::LICENSE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::InvalidAnswer {
                field: "license",
                value: s.into(),
            })
        }
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// A GitHub repository slug, `<owner>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Repository(String);

impl Repository {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn git_url(&self) -> String {
        format!("git+https://github.com/{}.git", self.0)
    }

    pub fn issues_url(&self) -> String {
        format!("https://github.com/{}/issues", self.0)
    }

    pub fn homepage(&self) -> String {
        format!("https://github.com/{}#readme", self.0)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Repository {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if patterns::REPOSITORY.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::InvalidAnswer {
                field: "repository",
                value: s.into(),
            })
        }
    }
}

// ── CompilerTarget ────────────────────────────────────────────────────────────

/// ECMAScript target for the compiler, normalised to lower case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompilerTarget(String);

impl CompilerTarget {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CompilerTarget {
    fn default() -> Self {
        Self("esnext".into())
    }
}

impl fmt::Display for CompilerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CompilerTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if patterns::COMPILER_TARGET.is_match(s) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(DomainError::InvalidAnswer {
                field: "target",
                value: s.into(),
            })
        }
    }
}

// ── ScriptName ────────────────────────────────────────────────────────────────

/// Name of a host-managed automation script, e.g. `Build`.
///
/// Invariant: never contains `@` or `.js`, both of which belong to the host's
/// on-disk naming (`@Build.js`), and never contains a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScriptName(String);

impl ScriptName {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let reason = if value.trim().is_empty() {
            Some("script name cannot be empty")
        } else if value.contains('@') {
            Some("script name cannot contain '@'")
        } else if value.contains(".js") {
            Some("script name cannot contain '.js'")
        } else if value.contains('/') || value.contains('\\') {
            Some("script name cannot contain path separators")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidScriptName {
                value,
                reason: reason.into(),
            }),
            None => Ok(Self(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the host stores this script under.
    pub fn file_name(&self) -> String {
        format!("@{}.js", self.0)
    }
}

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ScriptName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
