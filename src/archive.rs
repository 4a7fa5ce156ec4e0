//! Unpacking fetched packages.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::ArchiveError;

/// Unpack a gzip-compressed tarball at `archive` into `dest`.
///
/// `dest` is created if needed.  Entries whose paths would land outside
/// `dest` (absolute paths, `..` components) abort the extraction.
///
/// # Errors
///
/// Returns [`ArchiveError::Read`] if the archive cannot be opened, decoded,
/// or written out, and [`ArchiveError::UnsafeEntry`] for escaping entries.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<(), ArchiveError> {
    let read_err = |source| ArchiveError::Read {
        path: archive.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dest).map_err(read_err)?;
    let file = File::open(archive).map_err(read_err)?;
    let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));

    let mut count = 0usize;
    for entry in tar.entries().map_err(read_err)? {
        let mut entry = entry.map_err(read_err)?;
        let name = entry
            .path()
            .map(|p| p.display().to_string())
            .map_err(read_err)?;
        if !entry.unpack_in(dest).map_err(read_err)? {
            return Err(ArchiveError::UnsafeEntry {
                path: archive.to_path_buf(),
                entry: name,
            });
        }
        count += 1;
    }
    tracing::debug!(
        "unpacked {count} entries from {} into {}",
        archive.display(),
        dest.display()
    );
    Ok(())
}
