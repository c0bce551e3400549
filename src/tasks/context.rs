//! Shared state handed to every task.
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};

/// Shared context for task execution.
pub struct Context {
    /// Resolved paths and managed names.
    pub config: Config,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to preview deploy/undeploy changes without applying them.
    pub dry_run: bool,
    /// Filesystem operation abstraction (injectable for testing).
    pub fs_ops: Arc<dyn FileSystemOps>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("fs_ops", &"<dyn FileSystemOps>")
            .finish()
    }
}

impl Context {
    /// Creates a new context backed by the real filesystem.
    #[must_use]
    pub fn new(config: Config, log: Arc<dyn Log>, dry_run: bool) -> Self {
        Self {
            config,
            log,
            dry_run,
            fs_ops: Arc::new(SystemFileSystemOps::new()),
        }
    }

    /// Overlay directory.
    #[must_use]
    pub fn mods_dir(&self) -> &Path {
        &self.config.mods_dir
    }

    /// Output tree.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Deployment target.
    #[must_use]
    pub fn target_dir(&self) -> &Path {
        &self.config.target_dir
    }

    /// Create a copy of this context with a different [`FileSystemOps`]
    /// implementation.
    ///
    /// Used in tests to inject a [`MockFileSystemOps`](crate::operations::MockFileSystemOps)
    /// so that tasks can be exercised without real link privileges.
    #[must_use]
    pub fn with_fs_ops(self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        Self { fs_ops, ..self }
    }
}
