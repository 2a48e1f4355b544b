//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kelp_adapters::OverwritePolicy;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "kelp",
    bin_name = "kelp",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "TypeScript boilerplate for script-driven projects",
    long_about = "kelp writes package.json, tsconfig.json and an entry source into a \
                  host-managed project, installs the compiler, and patches the host's \
                  Build, Prep and Run scripts to compile and run TypeScript.",
    after_help = "EXAMPLES:\n\
        \x20 kelp generate ./my-lib\n\
        \x20 kelp generate ./my-lib --answers answers.json --overwrite never\n\
        \x20 kelp use . --skip-install\n\
        \x20 kelp ignore-fragment >> .gitignore",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold TypeScript into a freshly created host project.
    #[command(
        visible_alias = "g",
        alias = "kelp",
        about = "Generate TypeScript boilerplate",
        after_help = "EXAMPLES:\n\
            \x20 kelp generate ./my-lib\n\
            \x20 kelp generate ./my-lib --identifier my-lib --github-username octocat\n\
            \x20 kelp g . --answers answers.json --skip-install"
    )]
    Generate(GenerateArgs),

    /// Add TypeScript support to an existing host project.
    #[command(
        about = "Add TypeScript support to an existing project",
        after_help = "EXAMPLES:\n\
            \x20 kelp use .\n\
            \x20 kelp use ./legacy --overwrite never --answers answers.json"
    )]
    Use(GenerateArgs),

    /// Print the lines the host merges into `.gitignore`.
    #[command(about = "Print the .gitignore fragment")]
    IgnoreFragment,

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kelp init\n\
            \x20 kelp init --force\n\
            \x20 kelp -c ./kelp.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kelp completions bash > ~/.local/share/bash-completion/completions/kelp\n\
            \x20 kelp completions zsh  > ~/.zfunc/_kelp\n\
            \x20 kelp completions fish > ~/.config/fish/completions/kelp.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the loaded configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kelp config get install.command\n\
            \x20 kelp config list\n\
            \x20 kelp config path"
    )]
    Config(ConfigCommands),
}

// ── generate / use ────────────────────────────────────────────────────────────

/// Arguments shared by `kelp generate` and `kelp use`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Root of the host project.
    #[arg(value_name = "DIR", default_value = ".", help = "Project directory")]
    pub dir: PathBuf,

    /// Project identifier. Read from the host's project metadata when omitted.
    #[arg(long = "identifier", value_name = "NAME", help = "Project identifier")]
    pub identifier: Option<String>,

    /// JSON file with preset answers. Runs without prompting.
    #[arg(
        short = 'a',
        long = "answers",
        value_name = "FILE",
        help = "Answer questions from a JSON file"
    )]
    pub answers: Option<PathBuf>,

    /// What to do when a generated file already exists.
    #[arg(
        long = "overwrite",
        value_name = "POLICY",
        default_value = "ask",
        help = "Overwrite policy: ask, always or never"
    )]
    pub overwrite: OverwritePolicy,

    /// Do not run the dependency install command.
    #[arg(long = "skip-install", help = "Skip installing the compiler")]
    pub skip_install: bool,

    /// Replace the configured install command.
    #[arg(
        long = "install-command",
        value_name = "CMD",
        conflicts_with = "skip_install",
        help = "Dependency install command"
    )]
    pub install_command: Option<String>,

    /// Directory the host keeps its scripts in.
    #[arg(long = "host-dir", value_name = "NAME", help = "Host scripts directory")]
    pub host_dir: Option<String>,

    #[arg(long = "author-name", value_name = "NAME", help = "Author name")]
    pub author_name: Option<String>,

    #[arg(long = "github-username", value_name = "USER", help = "GitHub username")]
    pub github_username: Option<String>,

    #[arg(long = "email", value_name = "EMAIL", help = "Author email")]
    pub email: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `install.command`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generate_defaults() {
        let cli = Cli::parse_from(["kelp", "generate"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.dir, PathBuf::from("."));
        assert_eq!(args.overwrite, OverwritePolicy::Ask);
        assert!(!args.skip_install);
        assert!(args.identifier.is_none());
    }

    #[test]
    fn no_color_flag_parses_as_switch() {
        let cli = Cli::try_parse_from(["kelp", "--no-color", "ignore-fragment"]).unwrap();
        assert!(cli.global.no_color);
    }

    #[test]
    fn kelp_alias_runs_generate() {
        let cli = Cli::parse_from(["kelp", "kelp", "./my-lib", "--identifier", "my-lib"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.dir, PathBuf::from("./my-lib"));
        assert_eq!(args.identifier.as_deref(), Some("my-lib"));
    }

    #[test]
    fn use_takes_the_same_flags() {
        let cli = Cli::parse_from([
            "kelp",
            "use",
            ".",
            "--answers",
            "a.json",
            "--overwrite",
            "never",
            "--skip-install",
        ]);
        let Commands::Use(args) = cli.command else {
            panic!("expected Use command");
        };
        assert_eq!(args.overwrite, OverwritePolicy::Never);
        assert_eq!(args.answers, Some(PathBuf::from("a.json")));
    }

    #[test]
    fn unknown_overwrite_policy_is_rejected() {
        assert!(Cli::try_parse_from(["kelp", "generate", "--overwrite", "maybe"]).is_err());
    }

    #[test]
    fn install_command_conflicts_with_skip() {
        let result = Cli::try_parse_from([
            "kelp",
            "generate",
            "--skip-install",
            "--install-command",
            "pnpm add -D typescript",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kelp", "--quiet", "--verbose", "ignore-fragment"]);
        assert!(result.is_err());
    }
}
