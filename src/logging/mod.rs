//! Logging infrastructure for console output.

mod subscriber;

pub use subscriber::{LOG_ENV, STAGE_TARGET, console_level, init_subscriber};

/// Log a stage header (major section).
#[macro_export]
macro_rules! stage {
    ($($arg:tt)+) => {
        ::tracing::info!(target: "toolstrap::stage", $($arg)+)
    };
}
