//! Command: resolve (and optionally validate) an application install layout.
use std::io::{self, Write};

use anyhow::{Context as _, Result};

use crate::cli::LayoutOpts;
use crate::config::LauncherConfig;
use crate::layout::app::{app_spec, app_spec_vars};
use crate::layout::{Mode, SpecDir};

/// Run the layout command.
///
/// Prints every alias with its path, or only the path of `--alias`.
///
/// # Errors
///
/// Returns an error if no version is known, the root does not match the
/// layout, validation fails, or the alias is unknown.
pub fn run(config: &LauncherConfig, opts: &LayoutOpts, out: &mut dyn Write) -> Result<()> {
    let version = opts
        .version
        .as_deref()
        .or(config.version.as_deref())
        .context("no version given: pass --app-version or set `version` in the config")?;

    let mode = if opts.validate {
        Mode::Validate
    } else {
        Mode::SpecOnly
    };
    let vars = app_spec_vars(&config.app, version);
    let dir = SpecDir::bind(&opts.root, &app_spec()?, &vars, mode)?;
    if opts.validate {
        crate::stage!("{} matches the {} layout", opts.root.display(), config.app);
    }

    if let Some(alias) = &opts.alias {
        let path = dir
            .try_path(alias)
            .with_context(|| format!("unknown layout alias '{alias}'"))?;
        writeln!(out, "{}", path.display())?;
    } else {
        render(&dir, out)?;
    }
    Ok(())
}

/// Write one `alias  path` line per alias, in structural order.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn render(dir: &SpecDir, out: &mut dyn Write) -> io::Result<()> {
    for (alias, path) in dir.describe() {
        writeln!(out, "{alias:<20} {}", path.display())?;
    }
    Ok(())
}
