//! Package source descriptors.
use std::fmt;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

/// Where a package's bytes come from.
///
/// The variant is decided once, when the descriptor is built, so the
/// acquisition algorithm never re-parses the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// An absolute `http` or `https` URL.
    Remote(Url),
}

/// A package origin plus optional integrity metadata.
///
/// # Examples
///
/// ```
/// use toolstrap::fetch::{Location, PkgSrc};
///
/// let remote = PkgSrc::new("https://example.com/dist/tool-1.0.0.tgz", None);
/// assert!(matches!(remote.location(), Location::Remote(_)));
///
/// let local = PkgSrc::new("dist/tool-1.0.0.tgz", None);
/// assert!(matches!(local.location(), Location::Local(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgSrc {
    raw: String,
    location: Location,
    checksum: Option<String>,
}

impl PkgSrc {
    /// Build a descriptor from a path-or-URL string.
    ///
    /// Strings that parse as absolute URLs with an `http` or `https` scheme
    /// are remote; everything else (including `file:` URLs and Windows
    /// drive paths such as `C:\pkg.tgz`) is treated as a local path.
    /// `checksum` is a hex-encoded SHA-256 digest; blank values are ignored.
    #[must_use]
    pub fn new(src: impl Into<String>, checksum: Option<&str>) -> Self {
        let raw = src.into();
        let location = match Url::parse(&raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Location::Remote(url),
            _ => Location::Local(PathBuf::from(&raw)),
        };
        let checksum = checksum
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_ascii_lowercase);
        Self {
            raw,
            location,
            checksum,
        }
    }

    /// The string this descriptor was built from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Local path or remote URL.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Expected SHA-256 digest in lowercase hex, if any.
    #[must_use]
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Returns `true` if the descriptor was built from an empty string.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// File name the package is stored under in the destination directory.
    ///
    /// Local sources keep their own base name; remote sources use the last
    /// non-empty segment of the URL path, percent-decoded.  A decoded name
    /// that is not a single path component (`a%2Fb`, `..`) yields `None`.
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        match &self.location {
            Location::Local(path) => Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            Location::Remote(url) => {
                let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;
                let name = percent_decode_str(segment).decode_utf8().ok()?;
                is_plain_file_name(&name).then(|| name.into_owned())
            }
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}

impl fmt::Display for PkgSrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
