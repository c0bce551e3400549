//! Classify a filesystem node without following links.
use std::fmt;
use std::fs::Metadata;
use std::io;
use std::path::Path;

/// What currently occupies a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Nothing at the path.
    Absent,
    /// A symbolic link (possibly broken) that is not a directory reparse point.
    Symlink,
    /// A Windows directory reparse point: a junction or a directory symlink.
    DirReparsePoint,
    /// A real directory.
    Directory,
    /// A regular file.
    File,
}

impl PathKind {
    /// Returns `true` unless the path is [`PathKind::Absent`].
    #[must_use]
    pub const fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Absent => "absent",
            Self::Symlink => "symlink",
            Self::DirReparsePoint => "junction",
            Self::Directory => "directory",
            Self::File => "file",
        };
        f.write_str(s)
    }
}

/// Classify `path` using `symlink_metadata`, never dereferencing a link.
///
/// A path that does not exist (or has a non-directory ancestor) is
/// [`PathKind::Absent`].
///
/// # Errors
///
/// Any other metadata failure, such as a permission error on a parent
/// directory, is returned as is.
pub fn classify(path: &Path) -> io::Result<PathKind> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            return Ok(PathKind::Absent);
        }
        Err(e) => return Err(e),
    };
    let kind = if is_dir_reparse(&meta) {
        PathKind::DirReparsePoint
    } else if meta.file_type().is_symlink() {
        PathKind::Symlink
    } else if meta.is_dir() {
        PathKind::Directory
    } else {
        PathKind::File
    };
    Ok(kind)
}

#[cfg(windows)]
const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x10;
#[cfg(windows)]
const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x400;

/// `symlink_metadata().is_dir()` is `false` for directory symlinks and
/// junctions on Windows, so the raw attribute bits are checked instead.
#[cfg(windows)]
fn is_dir_reparse(meta: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    let attrs = meta.file_attributes();
    attrs & FILE_ATTRIBUTE_REPARSE_POINT != 0 && attrs & FILE_ATTRIBUTE_DIRECTORY != 0
}

#[cfg(not(windows))]
const fn is_dir_reparse(_meta: &Metadata) -> bool {
    false
}
