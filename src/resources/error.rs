//! Typed error variants for filesystem resource operations.
//!
//! Resource primitives return these variants where the caller may want to
//! distinguish the failure; everything else is plain I/O wrapped with
//! context and converted to [`anyhow::Error`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from merge, link, removal and extraction primitives.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Creating a directory symlink failed on a platform where it is the only
    /// aliasing mechanism.
    #[error("cannot symlink {dest} -> {source_dir}: {source}")]
    Symlink {
        /// Directory the link would point at.
        source_dir: PathBuf,
        /// Path where the link was to be created.
        dest: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Symlink, junction and copy all failed for a directory.
    #[error("no linking method worked for {dest}: {reason}")]
    LinkExhausted {
        /// Path where the alias was to be created.
        dest: PathBuf,
        /// Failure of each attempted method.
        reason: String,
    },

    /// The input is not a readable zip archive.
    #[error("invalid zip archive {archive}: {source}")]
    ArchiveFormat {
        /// Archive that failed to parse.
        archive: PathBuf,
        /// Error reported by the zip reader.
        source: zip::result::ZipError,
    },

    /// A node already occupies a path that must be vacant.
    #[error("destination already exists: {0}")]
    AlreadyExists(PathBuf),

    /// The requested operation is not available on this platform.
    #[error("operation '{operation}' is not supported on {platform}")]
    Unsupported {
        /// Name of the operation (e.g. `"junction"`).
        operation: String,
        /// Platform name.
        platform: String,
    },
}
