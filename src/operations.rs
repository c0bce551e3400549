//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that the link fallback chain and
//! the deploy/undeploy tasks can be unit-tested without real OS privilege
//! differences.  Production code uses [`SystemFileSystemOps`]; tests use the
//! `mockall`-generated `MockFileSystemOps`.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::platform::Platform;
use crate::resources::error::ResourceError;
use crate::resources::path_kind::{self, PathKind};
use crate::resources::{fs, remove};

/// Directory aliasing strategy: classify, remove and create the nodes that
/// deployment places at the target.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystemOps: Send + Sync {
    /// Classify the node at `path` without following links.
    ///
    /// # Errors
    ///
    /// Returns an error if the node's metadata cannot be read for any reason
    /// other than it not existing.
    fn classify(&self, path: &Path) -> std::io::Result<PathKind>;

    /// Read the target of the link or junction at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a link or cannot be read.
    fn read_link(&self, path: &Path) -> std::io::Result<PathBuf>;

    /// Remove the node at `path` without touching link targets.
    ///
    /// # Errors
    ///
    /// Returns an error if the node exists but cannot be removed.
    fn remove(&self, path: &Path) -> Result<()>;

    /// Create a native directory symlink at `dest` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns the raw I/O error (e.g. missing privilege on Windows).
    fn symlink_dir(&self, source: &Path, dest: &Path) -> std::io::Result<()>;

    /// Create a directory junction at `dest` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if junctions are unsupported or creation fails.
    fn junction(&self, source: &Path, dest: &Path) -> Result<()>;

    /// Whether [`FileSystemOps::junction`] is a real second mechanism here.
    fn supports_junctions(&self) -> bool;

    /// Recursively copy the tree at `source` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory or file cannot be written.
    fn copy_tree(&self, source: &Path, dest: &Path) -> Result<()>;

    /// Copy a single file, preserving its timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be copied.
    fn copy_file(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// Production [`FileSystemOps`] implementation backed by [`std::fs`].
#[derive(Debug, Clone, Copy)]
pub struct SystemFileSystemOps {
    platform: Platform,
}

impl SystemFileSystemOps {
    /// Create an implementation for the detected platform.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            platform: Platform::detect(),
        }
    }
}

impl Default for SystemFileSystemOps {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemOps for SystemFileSystemOps {
    fn classify(&self, path: &Path) -> std::io::Result<PathKind> {
        path_kind::classify(path)
    }

    fn read_link(&self, path: &Path) -> std::io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        remove::remove_path(path)
    }

    fn symlink_dir(&self, source: &Path, dest: &Path) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(source, dest)
        }
        #[cfg(windows)]
        {
            std::os::windows::fs::symlink_dir(source, dest)
        }
    }

    fn junction(&self, source: &Path, dest: &Path) -> Result<()> {
        if !self.platform.supports_junctions() {
            return Err(ResourceError::Unsupported {
                operation: "junction".to_string(),
                platform: self.platform.os.to_string(),
            }
            .into());
        }
        let dest_str = dest.to_string_lossy();
        let source_str = source.to_string_lossy();
        crate::exec::run("cmd", &["/c", "mklink", "/J", &dest_str, &source_str])?;
        Ok(())
    }

    fn supports_junctions(&self) -> bool {
        self.platform.supports_junctions()
    }

    fn copy_tree(&self, source: &Path, dest: &Path) -> Result<()> {
        fs::merge_tree(source, dest).map(|_| ())
    }

    fn copy_file(&self, source: &Path, dest: &Path) -> Result<()> {
        fs::copy_file_with_metadata(source, dest)
    }
}
