//! Domain-specific error types for the launcher core.
//!
//! Library modules return the typed errors below so callers can branch on
//! the failure kind; command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error types
//!
//! ```text
//! LayoutError  : layout construction, root name, missing paths
//! FetchError   : package acquisition
//! ArchiveError : unpacking a fetched package
//! HookError    : git hook installation
//! ConfigError  : launcher configuration loading
//! ```
//!
//! Every message embeds the concrete path or URL involved.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building, binding, or validating a layout spec.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The tree definition is malformed (duplicate or missing alias).
    #[error("invalid layout spec: {0}")]
    InvalidSpec(String),

    /// The final component of the bound root does not match the root template.
    #[error("{root} is not a path to {expected}")]
    RootNameMismatch {
        /// Root path as supplied by the caller.
        root: String,
        /// Substituted root name the spec expects.
        expected: String,
    },

    /// A required node is absent on disk.
    #[error("{} does not exist", .path.display())]
    MissingPath {
        /// Path of the missing node, starting at the root's own name.
        path: PathBuf,
    },

    /// The filesystem could not be queried for a node.
    #[error("cannot inspect {}: {source}", .path.display())]
    Io {
        /// Absolute path that could not be inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors raised while acquiring a package into a directory.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source is missing, unreachable, or does not name a file.
    #[error("{location} {detail}")]
    SourceNotFound {
        /// Local path or URL of the source.
        location: String,
        /// Why the source could not be used (e.g. `does not exist`).
        detail: String,
    },

    /// The source was opened but streaming its bytes failed.
    #[error("failed to transfer {location}: {source}")]
    TransferFailed {
        /// Local path or URL of the source.
        location: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The staging file could not be created or promoted.
    #[error("cannot write {}: {source}", .path.display())]
    DestinationUnwritable {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The transferred bytes do not hash to the expected checksum.
    #[error("checksum mismatch for {location}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Local path or URL of the source.
        location: String,
        /// Hex digest supplied with the source.
        expected: String,
        /// Hex digest of the transferred bytes.
        actual: String,
    },
}

impl FetchError {
    /// A source that does not exist (missing file, HTTP 404).
    pub(crate) fn not_found(location: impl Into<String>) -> Self {
        Self::SourceNotFound {
            location: location.into(),
            detail: "does not exist".to_string(),
        }
    }

    /// A remote source whose host could not be reached.
    pub(crate) fn unreachable(location: impl Into<String>, reason: &io::Error) -> Self {
        Self::SourceNotFound {
            location: location.into(),
            detail: format!("is unreachable: {reason}"),
        }
    }
}

/// Errors raised while unpacking an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive could not be opened or decoded.
    #[error("cannot read archive {}: {source}", .path.display())]
    Read {
        /// Path of the archive.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An entry would be written outside the destination directory.
    #[error("archive {} contains an entry outside the destination: {entry}", .path.display())]
    UnsafeEntry {
        /// Path of the archive.
        path: PathBuf,
        /// Entry path as recorded in the archive.
        entry: String,
    },
}

/// Errors raised while installing git hooks.
#[derive(Error, Debug)]
pub enum HookError {
    /// The project has no `.git` directory.
    #[error(".git directory does not exist at {}", .0.display())]
    NotARepository(PathBuf),

    /// Writing the hook script failed.
    #[error("cannot write hook {}: {source}", .path.display())]
    Write {
        /// Path of the hook script.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors raised while loading the launcher configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::LauncherConfig`].
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}
