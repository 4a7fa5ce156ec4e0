//! Git hook installation.
use std::path::{Path, PathBuf};

use crate::error::HookError;

/// Render the `pre-commit` hook that verifies formatting of staged Go files
/// through the project wrapper script `wrapper`.
#[must_use]
pub fn pre_commit_script(wrapper: &str) -> String {
    format!(
        r#"#!/bin/sh
# Installed by toolstrap. Rejects commits whose staged Go files are not formatted.
gofiles=$(git diff --cached --name-only --diff-filter=ACM | grep '\.go$')
[ -z "$gofiles" ] && exit 0

unformatted=$(./{wrapper} format --verify $gofiles)
[ -z "$unformatted" ] && exit 0

echo >&2 "Go files must be formatted. Run the following command to format them:"
echo >&2 ""
echo >&2 "  ./{wrapper} format $(echo $unformatted | tr '\n' ' ')"
exit 1
"#
    )
}

/// Install the `pre-commit` hook into `<project_dir>/.git/hooks/`.
///
/// Any existing `pre-commit` hook is replaced.
///
/// # Errors
///
/// Returns [`HookError::NotARepository`] if `<project_dir>/.git` does not
/// exist, and [`HookError::Write`] if the hook cannot be written.
pub fn install_git_hooks(project_dir: &Path, wrapper: &str) -> Result<PathBuf, HookError> {
    let git_dir = project_dir.join(".git");
    if !git_dir.is_dir() {
        return Err(HookError::NotARepository(git_dir));
    }

    let hooks_dir = git_dir.join("hooks");
    let target = hooks_dir.join("pre-commit");
    let write_err = |source| HookError::Write {
        path: target.clone(),
        source,
    };

    std::fs::create_dir_all(&hooks_dir).map_err(write_err)?;
    std::fs::write(&target, pre_commit_script(wrapper)).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o755))
            .map_err(write_err)?;
    }

    tracing::info!("installed git hook {}", target.display());
    Ok(target)
}
