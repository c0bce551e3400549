//! A single top-level entry deployed from the output tree into the target.
use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::link::{LinkMethod, link_dir};
use super::path_kind::PathKind;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::operations::FileSystemOps;

/// How an entry was placed at the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMethod {
    /// A directory made reachable by the link fallback chain.
    Dir(LinkMethod),
    /// A plain file copied with its timestamps.
    File,
}

impl fmt::Display for DeployMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dir(method) => method.fmt(f),
            Self::File => f.write_str("copied file"),
        }
    }
}

/// A deployed entry: `source` inside the output tree, `target` inside the
/// deployment directory.
pub struct DeployedEntry {
    /// Entry inside the output tree.
    pub source: PathBuf,
    /// Destination inside the deployment target.
    pub target: PathBuf,
    ops: Arc<dyn FileSystemOps>,
}

impl fmt::Debug for DeployedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployedEntry")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("ops", &"<dyn FileSystemOps>")
            .finish()
    }
}

impl DeployedEntry {
    /// Create a new deployed-entry resource.
    #[must_use]
    pub fn new(source: PathBuf, target: PathBuf, ops: Arc<dyn FileSystemOps>) -> Self {
        Self {
            source,
            target,
            ops,
        }
    }
}

impl Applicable for DeployedEntry {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        // A leftover link, junction or copy would make link creation fail.
        self.ops
            .remove(&self.target)
            .with_context(|| format!("remove existing: {}", self.target.display()))?;

        let method = if self.source.is_dir() {
            let method = link_dir(self.ops.as_ref(), &self.source, &self.target)
                .with_context(|| format!("link {}", self.target.display()))?;
            DeployMethod::Dir(method)
        } else {
            self.ops
                .copy_file(&self.source, &self.target)
                .with_context(|| format!("copy to {}", self.target.display()))?;
            DeployMethod::File
        };
        Ok(ResourceChange::Applied(method))
    }

    fn remove(&self) -> Result<ResourceChange> {
        let kind = self
            .ops
            .classify(&self.target)
            .with_context(|| format!("inspecting {}", self.target.display()))?;
        if !kind.is_present() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        self.ops
            .remove(&self.target)
            .with_context(|| format!("remove deployed: {}", self.target.display()))?;
        Ok(ResourceChange::Removed)
    }
}

impl Resource for DeployedEntry {
    fn current_state(&self) -> Result<ResourceState> {
        let kind = self
            .ops
            .classify(&self.target)
            .with_context(|| format!("inspecting {}", self.target.display()))?;
        match kind {
            PathKind::Absent if !self.source.exists() => Ok(ResourceState::Invalid {
                reason: format!("not in output: {}", self.source.display()),
            }),
            PathKind::Absent => Ok(ResourceState::Missing),
            PathKind::Symlink | PathKind::DirReparsePoint => {
                let link = self
                    .ops
                    .read_link(&self.target)
                    .with_context(|| format!("reading link {}", self.target.display()))?;
                if points_at(&link, &self.source) {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Incorrect {
                        current: format!("links to {}", link.display()),
                    })
                }
            }
            kind => Ok(ResourceState::Incorrect {
                current: format!("real {kind}"),
            }),
        }
    }
}

/// Compare a link's stored target with `source`, ignoring the `\\?\` prefix
/// Windows adds to junction targets.
fn points_at(link: &Path, source: &Path) -> bool {
    let source = dunce::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
    dunce::simplified(link) == dunce::simplified(&source)
}
