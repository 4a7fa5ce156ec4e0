//! Package acquisition: copy or download a package into a directory.
//!
//! [`Fetcher::download_into_directory`] never exposes a partially written
//! file under its final name.  Bytes are streamed into a staging file in the
//! destination directory and renamed over the destination only after the
//! whole stream (and its checksum, when one is supplied) has been verified.
//! A pre-existing destination file is left byte-for-byte intact on every
//! failure path.
//!
//! Two concurrent downloads of the same name into the same directory are
//! not coordinated: readers never observe a partial file, but the last
//! rename wins.

mod source;
mod staging;
mod transport;

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub use source::{Location, PkgSrc};
pub use transport::{HttpResponse, HttpTransport, UreqTransport};

#[cfg(test)]
pub(crate) use transport::MockHttpTransport;

use crate::config::HttpConfig;
use crate::error::FetchError;
use staging::StagedFile;

/// Acquires packages from local paths or HTTP(S) URLs.
pub struct Fetcher {
    transport: Box<dyn HttpTransport>,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher").finish_non_exhaustive()
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(UreqTransport::default())
    }
}

impl Fetcher {
    /// Create a fetcher that issues remote requests through `transport`.
    #[must_use]
    pub fn new(transport: impl HttpTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Create a fetcher backed by [`UreqTransport`] configured from `config`.
    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        Self::new(UreqTransport::new(config))
    }

    /// Place the package described by `src` into `dest_dir`.
    ///
    /// Writes `Getting package from <src>...` to `progress` before any I/O.
    /// The destination file name is the source's base name (local) or the
    /// last URL path segment (remote).  If a local source already is the
    /// destination file, nothing is read or written.
    ///
    /// `dest_dir` must already exist.
    ///
    /// # Errors
    ///
    /// - [`FetchError::SourceNotFound`] if the source is empty, missing,
    ///   unreachable, or does not name a file.
    /// - [`FetchError::TransferFailed`] if reading or writing fails mid-stream,
    ///   or the server answers with a non-success status other than 404/410.
    /// - [`FetchError::DestinationUnwritable`] if the staging file cannot be
    ///   created in `dest_dir` or cannot be renamed into place.
    /// - [`FetchError::ChecksumMismatch`] if the bytes do not match `src`'s
    ///   checksum.
    pub fn download_into_directory(
        &self,
        src: &PkgSrc,
        dest_dir: &Path,
        progress: &mut dyn Write,
    ) -> Result<PathBuf, FetchError> {
        if let Err(e) = writeln!(progress, "Getting package from {src}...") {
            tracing::debug!("progress sink rejected write: {e}");
        }

        if src.is_empty() {
            return Err(FetchError::SourceNotFound {
                location: "package source".to_string(),
                detail: "is empty".to_string(),
            });
        }
        let name = src.file_name().ok_or_else(|| FetchError::SourceNotFound {
            location: src.to_string(),
            detail: "does not name a file".to_string(),
        })?;
        let dest = dest_dir.join(name);

        let mut reader = match src.location() {
            Location::Local(path) => {
                if is_same_file(path, &dest) {
                    tracing::info!("{} is already in place", dest.display());
                    return Ok(dest);
                }
                open_local(path, src.as_str())?
            }
            Location::Remote(url) => self.open_remote(url.as_str())?,
        };

        let mut staged = StagedFile::create(&dest)?;
        let (bytes, digest) = staged.fill(&mut reader, src.as_str())?;

        if let Some(expected) = src.checksum()
            && expected != digest
        {
            return Err(FetchError::ChecksumMismatch {
                location: src.to_string(),
                expected: expected.to_string(),
                actual: digest,
            });
        }

        let dest = staged.promote()?;
        tracing::info!("fetched {bytes} bytes from {src} into {}", dest.display());
        if let Err(e) = writeln!(progress, "Downloaded {bytes} bytes to {}", dest.display()) {
            tracing::debug!("progress sink rejected write: {e}");
        }
        Ok(dest)
    }

    fn open_remote(&self, url: &str) -> Result<Box<dyn Read + Send>, FetchError> {
        let response = self
            .transport
            .get(url)
            .map_err(|e| FetchError::unreachable(url, &e))?;
        match response.status {
            404 | 410 => Err(FetchError::not_found(url)),
            _ if response.is_success() => Ok(response.body),
            status => Err(FetchError::TransferFailed {
                location: url.to_string(),
                source: io::Error::other(format!("server responded with HTTP {status}")),
            }),
        }
    }
}

/// [`Fetcher::download_into_directory`] with the default HTTP transport.
///
/// # Errors
///
/// See [`Fetcher::download_into_directory`].
pub fn download_into_directory(
    src: &PkgSrc,
    dest_dir: &Path,
    progress: &mut dyn Write,
) -> Result<PathBuf, FetchError> {
    Fetcher::default().download_into_directory(src, dest_dir, progress)
}

fn open_local(path: &Path, location: &str) -> Result<Box<dyn Read + Send>, FetchError> {
    match File::open(path) {
        Ok(file) => Ok(Box::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FetchError::not_found(location)),
        Err(source) => Err(FetchError::TransferFailed {
            location: location.to_string(),
            source,
        }),
    }
}

/// Returns `true` if both paths resolve to the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
