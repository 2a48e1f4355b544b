//! `kelp generate` and `kelp use`.
//!
//! Responsibility: assemble the host capabilities from CLI arguments and
//! config, call the plugin entry point, and display the report. No
//! generation logic lives here.

use std::path::Path;

use tracing::{debug, instrument, warn};

use kelp_adapters::{FileScriptPatcher, HostLayout, LocalFilesystem, PresetAnswers, ShellRunner};
use kelp_core::{
    application::{GenerationMode, GenerationRequest, Host, ports::Prompter},
    domain::{IdentityContext, ProjectIdentifier, patterns},
    error::KelpError,
    plugin,
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::SpinnerRunner,
};

#[instrument(skip_all, fields(mode = %mode, dir = %args.dir.display()))]
pub fn execute(
    args: GenerateArgs,
    mode: GenerationMode,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if !args.dir.is_dir() {
        return Err(CliError::ProjectDirNotFound { path: args.dir });
    }

    let host_dir = args
        .host_dir
        .clone()
        .unwrap_or_else(|| config.host.metadata_dir.clone());
    let layout = HostLayout::new(&args.dir, &host_dir)?;

    let identifier = resolve_identifier(&args, &layout)?;
    let identity = resolve_identity(&args, &config);
    for problem in identity_problems(&identity) {
        warn!("{problem}");
        output.warning(&problem)?;
    }
    debug!(%identifier, host_dir, "Resolved project");

    let hide_spinner = output.is_quiet() || output.format() == OutputFormat::Json;
    let host = Host {
        prompter: build_prompter(&args)?,
        filesystem: Box::new(LocalFilesystem),
        runner: Box::new(SpinnerRunner::new(ShellRunner::new(&args.dir)).hidden(hide_spinner)),
        scripts: Box::new(FileScriptPatcher::new(layout.scripts_dir(), LocalFilesystem)),
    };

    let mut request = GenerationRequest::new(&args.dir, identifier)
        .with_identity(identity)
        .with_host_dir(host_dir);
    request = if args.skip_install || config.install.skip {
        request.skip_install()
    } else {
        request.with_install_command(
            args.install_command
                .clone()
                .unwrap_or_else(|| config.install.command.clone()),
        )
    };

    let report = match mode {
        GenerationMode::Fresh => plugin::generator(host, request)?,
        GenerationMode::AddSupport => plugin::use_support(host, request)?,
    };

    output.report(&report, &config.host.run_command)?;
    Ok(())
}

/// `--identifier`, or what the host recorded for the project.
fn resolve_identifier(args: &GenerateArgs, layout: &HostLayout) -> CliResult<ProjectIdentifier> {
    match &args.identifier {
        Some(raw) => Ok(ProjectIdentifier::parse(raw.as_str()).map_err(KelpError::from)?),
        None => Ok(layout.read_identifier(&LocalFilesystem)?),
    }
}

/// Config identity with CLI flags on top.
fn resolve_identity(args: &GenerateArgs, config: &AppConfig) -> IdentityContext {
    let mut identity = config.identity();
    if let Some(name) = &args.author_name {
        identity.name = Some(name.clone());
    }
    if let Some(username) = &args.github_username {
        identity.github_username = Some(username.clone());
    }
    if let Some(email) = &args.email {
        identity.email = Some(email.clone());
    }
    identity
}

/// Identity values that look wrong. They are still used as given.
fn identity_problems(identity: &IdentityContext) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(email) = identity.email().filter(|e| !patterns::EMAIL.is_match(e)) {
        problems.push(format!("'{email}' does not look like an email address"));
    }
    if let Some(username) = identity
        .github_username()
        .filter(|u| !patterns::USERNAME.is_match(u))
    {
        problems.push(format!("'{username}' is not a valid GitHub username"));
    }
    problems
}

fn build_prompter(args: &GenerateArgs) -> CliResult<Box<dyn Prompter>> {
    if let Some(path) = &args.answers {
        return Ok(Box::new(preset_prompter(path, args)?));
    }
    interactive_prompter(args)
}

fn preset_prompter(path: &Path, args: &GenerateArgs) -> CliResult<kelp_adapters::ScriptedPrompter> {
    debug!(answers = %path.display(), "Using preset answers");
    Ok(PresetAnswers::from_file(path)?
        .into_prompter()
        .with_overwrite(args.overwrite))
}

#[cfg(feature = "interactive")]
fn interactive_prompter(args: &GenerateArgs) -> CliResult<Box<dyn Prompter>> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "stdin is not a terminal; pass --answers FILE to run without prompts".into(),
            source: None,
        });
    }
    Ok(Box::new(crate::prompt::TerminalPrompter::new(args.overwrite)))
}

#[cfg(not(feature = "interactive"))]
fn interactive_prompter(_args: &GenerateArgs) -> CliResult<Box<dyn Prompter>> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
