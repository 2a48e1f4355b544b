//! The fixed interview that produces [`Answers`].

use std::str::FromStr;

use tracing::{debug, instrument};

use crate::{
    application::ports::{Prompter, TextPrompt},
    domain::{
        Answers, CompilerTarget, EntryPoint, IdentityContext, License, ModuleKind,
        ProjectIdentifier, Repository, patterns,
    },
    error::KelpResult,
};

pub const DESCRIPTION: &str = "Description";
pub const ENTRY_POINT: &str = "Entry point";
pub const LICENSE: &str = "License";
pub const HAS_REPOSITORY: &str = "Do you have a GitHub repo?";
pub const REPOSITORY: &str = "Repository";
pub const TARGET: &str = "Target";
pub const MODULE: &str = "Module";

pub const DEFAULT_LICENSE: &str = "MIT";
pub const DEFAULT_TARGET: &str = "ESNext";

pub struct AnswerCollector<'a> {
    prompter: &'a dyn Prompter,
}

impl<'a> AnswerCollector<'a> {
    pub fn new(prompter: &'a dyn Prompter) -> Self {
        Self { prompter }
    }

    /// Ask every question in order. Cancelling any prompt aborts the interview.
    #[instrument(skip_all, fields(identifier = %identifier))]
    pub fn collect(
        &self,
        identity: &IdentityContext,
        identifier: &ProjectIdentifier,
    ) -> KelpResult<Answers> {
        let description = self
            .prompter
            .text(&TextPrompt::new(DESCRIPTION).allow_empty())?;

        let entry_point = match self.prompter.toggle(ENTRY_POINT, EntryPoint::OPTIONS)?.index() {
            0 => EntryPoint::Main,
            _ => EntryPoint::Index,
        };

        let license = self.prompter.text(
            &TextPrompt::new(LICENSE)
                .with_default(DEFAULT_LICENSE)
                .with_pattern(&patterns::LICENSE),
        )?;
        let license = License::from_str(&license)?;

        let repository = if self.prompter.confirm(HAS_REPOSITORY)? {
            let mut prompt = TextPrompt::new(REPOSITORY).with_pattern(&patterns::REPOSITORY);
            if let Some(user) = identity.github_username() {
                prompt = prompt.with_default(format!("{user}/{identifier}"));
            }
            Some(Repository::from_str(&self.prompter.text(&prompt)?)?)
        } else {
            None
        };

        let target = self.prompter.text(
            &TextPrompt::new(TARGET)
                .with_default(DEFAULT_TARGET)
                .with_pattern(&patterns::COMPILER_TARGET),
        )?;
        let compiler_target = CompilerTarget::from_str(&target)?;

        let module_kind = match self.prompter.toggle(MODULE, ModuleKind::OPTIONS)?.index() {
            0 => ModuleKind::NodeNext,
            _ => ModuleKind::CommonJs,
        };

        let answers = Answers {
            description,
            entry_point,
            license,
            repository,
            compiler_target,
            module_kind,
        };
        debug!(?answers, "answers collected");
        Ok(answers)
    }
}
