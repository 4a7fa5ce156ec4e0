//! Bakes the release version into the binary as `TOOLSTRAP_VERSION`.
#![allow(clippy::print_stdout)]

use std::process::Command;

fn main() {
    // TOOLSTRAP_VERSION wins when set by a release pipeline; local builds
    // fall back to git describe.
    if let Ok(version) = std::env::var("TOOLSTRAP_VERSION") {
        println!("cargo:rustc-env=TOOLSTRAP_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=TOOLSTRAP_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=TOOLSTRAP_VERSION");
}
