//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Version string baked in at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("TOOLSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the launcher version.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "toolstrap {}", version())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn prints_name_and_version() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("toolstrap "));
        assert!(out.trim_end().len() > "toolstrap ".len());
    }
}
