//! Command: install git hooks into a project.
use std::io::Write;

use anyhow::Result;

use crate::cli::HooksOpts;
use crate::config::LauncherConfig;
use crate::hooks::install_git_hooks;

/// Run the install-hooks command.
///
/// The hook calls the wrapper script `<app>w` at the project root.
///
/// # Errors
///
/// Returns an error if the project has no `.git` directory or the hook
/// cannot be written.
pub fn run(config: &LauncherConfig, opts: &HooksOpts, out: &mut dyn Write) -> Result<()> {
    let wrapper = format!("{}w", config.app);
    let path = install_git_hooks(&opts.project, &wrapper)?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}
