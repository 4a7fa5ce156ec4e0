//! Application launcher toolkit.
//!
//! Resolves the on-disk layout of a versioned application install and
//! fetches distribution packages from local paths or HTTP(S) URLs without
//! ever exposing a partially written file.
//!
//! The public API is organised into these layers:
//!
//! - **[`layout`]**: declarative directory layouts with named aliases,
//!   bound to a concrete root and optionally validated against the disk
//! - **[`fetch`]**: atomic copy-or-download of a package into a directory
//! - **[`archive`]** and **[`hooks`]**: post-fetch helpers (unpacking,
//!   git hook installation)
//! - **[`commands`]**: top-level subcommand orchestration (`layout`,
//!   `download`, `install-hooks`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod hooks;
pub mod layout;
pub mod logging;
pub mod platform;
