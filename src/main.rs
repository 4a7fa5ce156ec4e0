//! `toolstrap` command-line entry point.
use std::io::Write as _;

use anyhow::Result;
use clap::Parser;

use toolstrap::cli::{Cli, Command};
use toolstrap::commands;
use toolstrap::config::LauncherConfig;
use toolstrap::logging;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);

    let config = LauncherConfig::load(&args.global.config)?;
    tracing::debug!("using app '{}' from {}", config.app, args.global.config.display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match args.command {
        Command::Layout(opts) => commands::layout::run(&config, &opts, &mut out),
        Command::Download(opts) => commands::download::run(&config, &opts, &mut out),
        Command::InstallHooks(opts) => commands::hooks::run(&config, &opts, &mut out),
        Command::Version => commands::version::run(&mut out),
    };
    out.flush()?;
    result
}
