//! Place each top-level output entry into the deployment target.
use anyhow::{Context as _, Result};
use std::path::Path;
use std::sync::Arc;

use super::{Context, Task, TaskResult};
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::resources::deployment::{DeployMethod, DeployedEntry};
use crate::resources::{Applicable as _, ResourceChange};

/// Entries placed at the target, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    /// `(name, method)` for each deployed entry. Empty in dry-run mode.
    pub deployed: Vec<(String, DeployMethod)>,
    /// Names that would have been deployed in dry-run mode.
    pub planned: Vec<String>,
}

/// Deploy every top-level entry of `output_dir` into `target_dir`.
///
/// Whatever already sits at `target_dir/<name>` is removed first (links are
/// unlinked, never followed). Directories go through the link fallback
/// chain; files are copied with their timestamps. A failure stops the deploy
/// with earlier entries left in place.
///
/// # Errors
///
/// Returns an error if either directory is missing or an entry cannot be
/// removed, linked or copied.
pub fn deploy_output(
    output_dir: &Path,
    target_dir: &Path,
    ops: &Arc<dyn FileSystemOps>,
    log: &dyn Log,
    dry_run: bool,
) -> Result<DeployReport> {
    if !output_dir.is_dir() {
        anyhow::bail!(
            "output directory not found: {} (build first)",
            output_dir.display()
        );
    }
    if !target_dir.is_dir() {
        anyhow::bail!("target directory not found: {}", target_dir.display());
    }

    let mut entries = std::fs::read_dir(output_dir)
        .with_context(|| format!("reading {}", output_dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("reading {}", output_dir.display()))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    let mut report = DeployReport::default();
    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let dest = target_dir.join(&name);
        let resource = DeployedEntry::new(entry.path(), dest.clone(), Arc::clone(ops));

        if dry_run {
            let verb = if entry.path().is_dir() { "link" } else { "copy" };
            log.dry_run(&format!(
                "would {verb} {} -> {}",
                dest.display(),
                entry.path().display()
            ));
            report.planned.push(name);
            continue;
        }

        if let ResourceChange::Applied(method) = resource.apply()? {
            log.info(&format!("deployed {name}: {method} -> {}", dest.display()));
            report.deployed.push((name, method));
        }
    }
    Ok(report)
}

/// Deploy the output tree into the target.
#[derive(Debug)]
pub struct DeployOutput;

impl Task for DeployOutput {
    fn name(&self) -> &str {
        "Deploy output"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let report = deploy_output(
            ctx.output_dir(),
            ctx.target_dir(),
            &ctx.fs_ops,
            ctx.log.as_ref(),
            ctx.dry_run,
        )?;

        if ctx.dry_run {
            ctx.log
                .info(&format!("{} entries would be deployed", report.planned.len()));
            return Ok(TaskResult::DryRun);
        }
        if report.deployed.is_empty() {
            return Ok(TaskResult::Skipped("output is empty".to_string()));
        }
        ctx.log
            .info(&format!("{} entries deployed", report.deployed.len()));
        Ok(TaskResult::Ok)
    }
}
