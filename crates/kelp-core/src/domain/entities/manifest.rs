//! `package.json` and `tsconfig.json` models and the pure builder that derives
//! them from the user's answers.
//!
//! Field declaration order is the order keys appear in the rendered JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{
    entities::{answers::Answers, identity::IdentityContext},
    value_objects::{ProjectIdentifier, Repository},
};

/// Placeholder `npm test` command written into every new manifest.
pub const PLACEHOLDER_TEST_SCRIPT: &str = "echo \"Error: no test specified\" && exit 1";

/// Initial version of every generated package.
pub const INITIAL_VERSION: &str = "0.0.0";

/// Declaration file advertised through the manifest `types` field.
pub const TYPES_PATH: &str = "dist/index.d.ts";

// ── package.json ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub main: String,
    pub scripts: BTreeMap<String, String>,
    pub keywords: Vec<String>,
    pub author: String,
    pub license: String,
    pub dependencies: BTreeMap<String, String>,
    pub types: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub links: Option<RepositoryLinks>,
}

/// The repository-derived manifest fields.
///
/// Grouped in one struct so they are present or absent together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryLinks {
    pub repository: RepositoryField,
    pub bugs: BugsField,
    pub homepage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryField {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugsField {
    pub url: String,
}

impl RepositoryLinks {
    pub fn for_repository(repo: &Repository) -> Self {
        Self {
            repository: RepositoryField {
                kind: "git".into(),
                url: repo.git_url(),
            },
            bugs: BugsField {
                url: repo.issues_url(),
            },
            homepage: repo.homepage(),
        }
    }
}

// ── tsconfig.json ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerConfig {
    #[serde(rename = "compilerOptions")]
    pub compiler_options: CompilerOptions,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub target: String,
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_resolution: Option<String>,
    pub declaration: bool,
    pub out_dir: String,
    pub strict: bool,
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Pure mapping from answers and identity to the generated configuration.
///
/// No I/O; the same inputs always give the same outputs.
pub struct ManifestBuilder;

impl ManifestBuilder {
    pub fn build(
        identity: &IdentityContext,
        identifier: &ProjectIdentifier,
        answers: &Answers,
    ) -> (ProjectManifest, CompilerConfig) {
        (
            Self::manifest(identity, identifier, answers),
            Self::compiler_config(answers),
        )
    }

    pub fn manifest(
        identity: &IdentityContext,
        identifier: &ProjectIdentifier,
        answers: &Answers,
    ) -> ProjectManifest {
        ProjectManifest {
            name: identifier.as_str().to_string(),
            version: INITIAL_VERSION.into(),
            description: answers.description.clone(),
            main: answers.entry_point.compiled_path(),
            scripts: BTreeMap::from([("test".to_string(), PLACEHOLDER_TEST_SCRIPT.to_string())]),
            keywords: Vec::new(),
            author: identity.author(),
            license: answers.license.as_str().to_string(),
            dependencies: BTreeMap::new(),
            types: TYPES_PATH.into(),
            links: answers.repository.as_ref().map(RepositoryLinks::for_repository),
        }
    }

    pub fn compiler_config(answers: &Answers) -> CompilerConfig {
        CompilerConfig {
            compiler_options: CompilerOptions {
                target: answers.compiler_target.as_str().to_string(),
                module: answers.module_kind.as_str().to_string(),
                module_resolution: answers.module_kind.resolution().map(String::from),
                declaration: true,
                out_dir: "./dist".into(),
                strict: true,
            },
            include: vec!["src/**/*.ts".into()],
            exclude: vec!["node_modules".into(), "**/*.spec.ts".into()],
        }
    }
}

/// Render a value as JSON with four-space indentation.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
