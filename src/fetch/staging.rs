//! Temporary staging file promoted into place by rename.
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::FetchError;

/// Copy buffer size; memory use is bounded by this regardless of artifact size.
const CHUNK_SIZE: usize = 32 * 1024;

/// A temporary file inside the destination directory.
///
/// The file is deleted when the value is dropped, so every early return
/// discards it.  [`StagedFile::promote`] renames it over the final name;
/// after that, dropping has nothing left to clean up.
#[derive(Debug)]
pub(super) struct StagedFile {
    file: NamedTempFile,
    dest: PathBuf,
}

impl StagedFile {
    /// Create a staging file next to `dest`.
    pub(super) fn create(dest: &Path) -> Result<Self, FetchError> {
        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        let name = dest
            .file_name()
            .map_or_else(|| "package".into(), |n| n.to_string_lossy());
        let prefix = format!(".{name}.");
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".part");
        // Same mode as a plain create: 0666 minus umask.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }
        let file = builder
            .tempfile_in(dir)
            .map_err(|source| FetchError::DestinationUnwritable {
                path: dir.to_path_buf(),
                source,
            })?;
        tracing::debug!("staging {} at {}", dest.display(), file.path().display());
        Ok(Self {
            file,
            dest: dest.to_path_buf(),
        })
    }

    /// Stream `reader` into the staging file in bounded chunks.
    ///
    /// Returns the number of bytes written and their SHA-256 digest in hex.
    pub(super) fn fill(
        &mut self,
        reader: &mut dyn Read,
        location: &str,
    ) -> Result<(u64, String), FetchError> {
        let transfer_failed = |source| FetchError::TransferFailed {
            location: location.to_string(),
            source,
        };

        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut total: u64 = 0;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(transfer_failed(e)),
            };
            let chunk = buf.get(..n).unwrap_or_default();
            hasher.update(chunk);
            self.file.write_all(chunk).map_err(transfer_failed)?;
            total += n as u64;
        }
        self.file
            .as_file()
            .sync_all()
            .map_err(transfer_failed)?;
        Ok((total, hex::encode(hasher.finalize())))
    }

    /// Atomically replace the destination with the staged bytes.
    ///
    /// An existing destination file keeps its permissions.
    pub(super) fn promote(self) -> Result<PathBuf, FetchError> {
        let Self { file, dest } = self;
        if let Ok(meta) = std::fs::metadata(&dest)
            && meta.is_file()
        {
            file.as_file()
                .set_permissions(meta.permissions())
                .map_err(|source| FetchError::DestinationUnwritable {
                    path: dest.clone(),
                    source,
                })?;
        }
        file.persist(&dest)
            .map_err(|e| FetchError::DestinationUnwritable {
                path: dest.clone(),
                source: e.error,
            })?;
        tracing::debug!("promoted {}", dest.display());
        Ok(dest)
    }

    #[cfg(test)]
    pub(super) fn temp_path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    struct FailAfter {
        data: io::Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn promote_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("pkg.tgz");
        std::fs::write(&dest, "old").unwrap();

        let mut staged = StagedFile::create(&dest).unwrap();
        let (n, digest) = staged.fill(&mut &b"new bytes"[..], "src").unwrap();
        assert_eq!(n, 9);
        assert_eq!(digest, hex::encode(Sha256::digest(b"new bytes")));
        staged.promote().unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "new bytes");
    }

    #[test]
    fn drop_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("pkg.tgz");
        let staged = StagedFile::create(&dest).unwrap();
        let tmp = staged.temp_path().to_path_buf();
        assert!(tmp.exists());
        assert!(tmp.starts_with(dir.path()));
        drop(staged);
        assert!(!tmp.exists());
    }

    #[test]
    fn failed_fill_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("pkg.tgz");
        std::fs::write(&dest, "destination content").unwrap();

        let mut staged = StagedFile::create(&dest).unwrap();
        let mut reader = FailAfter {
            data: io::Cursor::new(b"partial".to_vec()),
        };
        let err = staged.fill(&mut reader, "http://host/pkg.tgz").unwrap_err();
        assert!(matches!(err, FetchError::TransferFailed { .. }));
        drop(staged);

        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "destination content"
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("pkg.tgz");
        let err = StagedFile::create(&dest).unwrap_err();
        assert!(matches!(err, FetchError::DestinationUnwritable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn promoted_file_gets_default_create_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference");
        std::fs::File::create(&reference).unwrap();
        let dest = dir.path().join("pkg.tgz");

        let mut staged = StagedFile::create(&dest).unwrap();
        staged.fill(&mut &b"bytes"[..], "src").unwrap();
        staged.promote().unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&dest), mode(&reference));
    }

    #[cfg(unix)]
    #[test]
    fn promote_keeps_existing_destination_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("pkg.tgz");
        std::fs::write(&dest, "old").unwrap();
        std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o640)).unwrap();

        let mut staged = StagedFile::create(&dest).unwrap();
        staged.fill(&mut &b"new"[..], "src").unwrap();
        staged.promote().unwrap();

        let mode = std::fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn promote_over_directory_fails_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("pkg.tgz");
        std::fs::create_dir_all(dest.join("inner")).unwrap();

        let mut staged = StagedFile::create(&dest).unwrap();
        staged.fill(&mut &b"bytes"[..], "src").unwrap();
        let err = staged.promote().unwrap_err();

        assert!(matches!(err, FetchError::DestinationUnwritable { ref path, .. } if *path == dest));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(dest.join("inner").is_dir());
    }
}
