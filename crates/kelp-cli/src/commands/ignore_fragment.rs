//! `kelp ignore-fragment`: print the lines the host merges into `.gitignore`.

use std::io::Write as _;

use kelp_core::plugin::GITIGNORE_FRAGMENT;

use crate::error::{CliResult, IntoCli};

/// Written raw so it can be piped, even with `--quiet`.
pub fn execute() -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(GITIGNORE_FRAGMENT.as_bytes())
        .with_cli_context(|| "failed to write the ignore fragment")
}
