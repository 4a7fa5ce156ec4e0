//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the launcher.
#[derive(Parser, Debug)]
#[command(
    name = "toolstrap",
    about = "Resolve install layouts and fetch distribution packages",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Launcher configuration file
    #[arg(long, global = true, default_value = "toolstrap.toml")]
    pub config: PathBuf,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the paths of an application install layout
    Layout(LayoutOpts),
    /// Copy or download a package into a directory
    Download(DownloadOpts),
    /// Install the pre-commit git hook into a project
    InstallHooks(HooksOpts),
    /// Print version information
    Version,
}

/// Options for the `layout` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct LayoutOpts {
    /// Installation root, named `<app>-<version>`
    pub root: PathBuf,

    /// Application version (defaults to the configured version)
    #[arg(long = "app-version")]
    pub version: Option<String>,

    /// Check that every required path exists
    #[arg(long)]
    pub validate: bool,

    /// Print only the path of this alias
    #[arg(long)]
    pub alias: Option<String>,
}

/// Options for the `download` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct DownloadOpts {
    /// Local path or http(s) URL of the package
    pub src: String,

    /// Existing directory to place the package in
    pub dest: PathBuf,

    /// Expected SHA-256 of the package (hex)
    #[arg(long)]
    pub checksum: Option<String>,

    /// Unpack the fetched .tgz into this directory
    #[arg(long)]
    pub unpack: Option<PathBuf>,
}

/// Options for the `install-hooks` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct HooksOpts {
    /// Project directory containing `.git`
    #[arg(default_value = ".")]
    pub project: PathBuf,
}
