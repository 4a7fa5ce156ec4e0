//! Command: fetch a package into a directory, optionally unpacking it.
use std::io::Write;

use anyhow::Result;

use crate::archive::unpack_tar_gz;
use crate::cli::DownloadOpts;
use crate::config::LauncherConfig;
use crate::fetch::{Fetcher, PkgSrc};

/// Run the download command with an HTTP client built from `config`.
///
/// # Errors
///
/// Returns an error if the package cannot be fetched or unpacked.
pub fn run(config: &LauncherConfig, opts: &DownloadOpts, out: &mut dyn Write) -> Result<()> {
    run_with(&Fetcher::from_config(&config.http), opts, out)
}

/// Run the download command with an explicit fetcher.
///
/// # Errors
///
/// Returns an error if the package cannot be fetched or unpacked.
pub fn run_with(fetcher: &Fetcher, opts: &DownloadOpts, out: &mut dyn Write) -> Result<()> {
    crate::stage!("Fetching {}", opts.src);
    let src = PkgSrc::new(opts.src.as_str(), opts.checksum.as_deref());
    let path = fetcher.download_into_directory(&src, &opts.dest, out)?;

    if let Some(dir) = &opts.unpack {
        crate::stage!("Unpacking into {}", dir.display());
        unpack_tar_gz(&path, dir)?;
    }
    writeln!(out, "{}", path.display())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetch::MockHttpTransport;

    #[test]
    fn copies_local_package_and_prints_path() {
        let src_dir = tempfile::tempdir().unwrap();
        let dst_dir = tempfile::tempdir().unwrap();
        let file = src_dir.path().join("pkg.bin");
        std::fs::write(&file, "bytes").unwrap();

        let opts = DownloadOpts {
            src: file.display().to_string(),
            dest: dst_dir.path().to_path_buf(),
            checksum: None,
            unpack: None,
        };
        let mut out = Vec::new();
        run_with(&Fetcher::new(MockHttpTransport::new()), &opts, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let dest = dst_dir.path().join("pkg.bin");
        assert!(out.contains(&format!("Getting package from {}...", file.display())));
        assert!(out.trim_end().ends_with(&dest.display().to_string()));
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "bytes");
    }

    #[test]
    fn unpack_failure_is_reported() {
        let src_dir = tempfile::tempdir().unwrap();
        let dst_dir = tempfile::tempdir().unwrap();
        let file = src_dir.path().join("pkg.tgz");
        std::fs::write(&file, "not gzip").unwrap();

        let opts = DownloadOpts {
            src: file.display().to_string(),
            dest: dst_dir.path().to_path_buf(),
            checksum: None,
            unpack: Some(dst_dir.path().join("out")),
        };
        let err = run_with(
            &Fetcher::new(MockHttpTransport::new()),
            &opts,
            &mut std::io::sink(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("pkg.tgz"));
    }
}
