//! Output management and formatting.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;

use kelp_core::application::{GenerationReport, InstallStatus, WriteOutcome};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins over config; Auto means Human on a TTY, Plain when piped.
        let requested = match args.output_format {
            OutputFormat::Auto => {
                <OutputFormat as ValueEnum>::from_str(&config.output.format, true).unwrap_or_default()
            }
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// `⚠ <msg>`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// `ℹ <msg>`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Print a finished generation run.
    ///
    /// JSON format writes the report even in quiet mode, since it is the
    /// command's only output.
    pub fn report(&self, report: &GenerationReport, run_command: &str) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
            return self.term.write_line(&json);
        }

        self.header(&format!("{} ({})", report.identifier, report.mode))?;
        for record in &report.files {
            let line = format!("{:<11} {}", record.outcome.as_str(), record.path.display());
            match record.outcome {
                WriteOutcome::Skipped => self.warning(&format!(
                    "{line} (kept your version; overwrite was declined)"
                ))?,
                _ => self.print(&format!("  {line}"))?,
            }
        }
        for script in &report.patched_scripts {
            self.print(&format!("  {:<11} @{script}.js", "patched"))?;
        }

        match &report.install {
            InstallStatus::Skipped => self.info("Dependency install skipped")?,
            InstallStatus::Succeeded { command } => self.info(&format!("Ran `{command}`"))?,
            InstallStatus::Failed { command, reason, .. } => self.warning(&format!(
                "`{command}` failed ({reason}); run it yourself before building"
            ))?,
        }

        self.success(&success_message(report, run_command))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// Closing line of a successful run.
pub fn success_message(report: &GenerationReport, run_command: &str) -> String {
    format!(
        "Successfully generated project. You can run it by using {run_command}. Start by editing {}",
        report.entry_source()
    )
}
