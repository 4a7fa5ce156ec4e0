//! Layout of an installed launcher application.
//!
//! ```text
//! {app}-{version}/
//! ├── bin/
//! │   └── {os}-{arch}/
//! │       └── {app}                  (executable)
//! └── wrapper/                       (optional, wrapper-dir)
//!     ├── {app}w                     (wrapper-script)
//!     └── {app}/
//!         ├── bin/
//!         │   └── {app}w
//!         └── config/                (wrapper-config-dir)
//! ```

use super::{LayoutSpec, NodeSpec, TemplateVars};
use crate::error::LayoutError;
use crate::platform::Platform;

/// Alias of the installation root.
pub const APP_ROOT: &str = "app-root";
/// Alias of the platform-specific executable.
pub const APP_EXECUTABLE: &str = "executable";
/// Alias of the wrapper distribution directory.
pub const WRAPPER_DIR: &str = "wrapper-dir";
/// Alias of the wrapper script.
pub const WRAPPER_SCRIPT: &str = "wrapper-script";
/// Alias of the wrapper configuration directory.
pub const WRAPPER_CONFIG_DIR: &str = "wrapper-config-dir";

/// Build the application layout spec.
///
/// # Errors
///
/// Never fails for the built-in tree; the `Result` reflects
/// [`LayoutSpec::new`].
pub fn app_spec() -> Result<LayoutSpec, LayoutError> {
    let tree = NodeSpec::dir("{app}-{version}")
        .alias(APP_ROOT)
        .child(
            NodeSpec::dir("bin").child(
                NodeSpec::dir("{os}-{arch}").child(NodeSpec::file("{app}").alias(APP_EXECUTABLE)),
            ),
        )
        .child(
            NodeSpec::dir("wrapper")
                .optional()
                .alias(WRAPPER_DIR)
                .child(NodeSpec::file("{app}w").alias(WRAPPER_SCRIPT))
                .child(
                    NodeSpec::dir("{app}")
                        .child(NodeSpec::dir("bin").child(NodeSpec::file("{app}w")))
                        .child(NodeSpec::dir("config").alias(WRAPPER_CONFIG_DIR)),
                ),
        );
    LayoutSpec::new(tree, &[APP_ROOT, APP_EXECUTABLE])
}

/// Template values for the application layout on the current platform.
#[must_use]
pub fn app_spec_vars(app: &str, version: &str) -> TemplateVars {
    app_spec_vars_for(app, version, &Platform::detect())
}

/// Template values for the application layout on `platform`.
#[must_use]
pub fn app_spec_vars_for(app: &str, version: &str, platform: &Platform) -> TemplateVars {
    TemplateVars::new()
        .with("app", app)
        .with("version", version)
        .with("os", platform.os.to_string())
        .with("arch", platform.arch.to_string())
}
