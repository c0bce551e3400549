//! Remove managed top-level names from the deployment target.
use anyhow::{Context as _, Result};
use std::sync::Arc;

use super::{Context, Task, TaskResult};
use crate::config::Config;
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::resources::deployment::DeployedEntry;
use crate::resources::{Applicable as _, ResourceChange};

/// Names removed (or, in dry-run mode, that would be removed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndeployReport {
    /// Managed names that were present at the target.
    pub removed: Vec<String>,
}

impl UndeployReport {
    /// Returns `true` if anything was removed.
    #[must_use]
    pub fn removed_any(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Remove every managed name found at the target, including broken links.
///
/// Only `target/<name>` for names in the managed set are considered. The
/// target directory itself and all other entries are never touched, and the
/// output tree does not need to exist.
///
/// # Errors
///
/// Returns an error if an entry cannot be inspected, or is present but
/// cannot be removed. Only a name that does not exist is passed over.
pub fn undeploy(
    config: &Config,
    ops: &Arc<dyn FileSystemOps>,
    log: &dyn Log,
    dry_run: bool,
) -> Result<UndeployReport> {
    let mut report = UndeployReport::default();
    for name in config.managed.iter() {
        let dest = config.target_dir.join(name);
        log.debug(&format!("checking {}", dest.display()));

        if dry_run {
            let kind = ops
                .classify(&dest)
                .with_context(|| format!("inspecting {}", dest.display()))?;
            if kind.is_present() {
                log.dry_run(&format!("would remove {kind} {}", dest.display()));
                report.removed.push(name.to_string());
            }
            continue;
        }

        let entry = DeployedEntry::new(config.output_dir.join(name), dest, Arc::clone(ops));
        if entry.remove()? == ResourceChange::Removed {
            log.info(&format!("removed from target: {}", entry.target.display()));
            report.removed.push(name.to_string());
        }
    }

    if !report.removed_any() {
        log.info("no deployed items found to remove");
    }
    Ok(report)
}

/// Remove deployed folders from the target.
#[derive(Debug)]
pub struct RemoveDeployed;

impl Task for RemoveDeployed {
    fn name(&self) -> &str {
        "Remove deployed folders"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.managed.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let report = undeploy(&ctx.config, &ctx.fs_ops, ctx.log.as_ref(), ctx.dry_run)?;
        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        if !report.removed_any() {
            return Ok(TaskResult::Skipped("nothing deployed".to_string()));
        }
        ctx.log
            .info(&format!("{} entries removed", report.removed.len()));
        Ok(TaskResult::Ok)
    }
}
