//! Top-level subcommand handlers.
//!
//! Each handler receives the launcher configuration constructed once in
//! `main` and a writer for its user-facing output.
pub mod download;
pub mod hooks;
pub mod layout;
pub mod version;
