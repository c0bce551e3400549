//! Merge every overlay into a freshly rebuilt output tree.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::{Context, Task, TaskResult};
use crate::logging::Log;
use crate::resources::archive::{extract_zip, is_zip};
use crate::resources::fs::merge_tree;
use crate::resources::remove::remove_path;

/// Scratch directory (inside the output tree) that archives are expanded
/// into before merging.
pub const SCRATCH_DIR_NAME: &str = "__temp__";

/// Counts gathered while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Directory overlays merged.
    pub directories: usize,
    /// Zip overlays merged.
    pub archives: usize,
    /// Entries that were neither a directory nor a `.zip` file.
    pub ignored: usize,
    /// Files written into the output tree, overwrites included.
    pub files: usize,
}

/// Rebuild `output_dir` from the overlays in `mods_dir`.
///
/// The output tree is cleared first. Overlays are applied in ascending name
/// order so that a later overlay's file wins over an earlier one at the same
/// relative path. Archives are expanded into [`SCRATCH_DIR_NAME`] under the
/// output tree, merged, and the scratch directory removed again.
///
/// # Errors
///
/// Returns an error if `mods_dir` is not a directory, or on the first I/O or
/// archive failure; the build is not resumed.
pub fn build_output(mods_dir: &Path, output_dir: &Path, log: &dyn Log) -> Result<BuildReport> {
    if !mods_dir.is_dir() {
        anyhow::bail!("mods directory not found: {}", mods_dir.display());
    }

    remove_path(output_dir)
        .with_context(|| format!("clearing output: {}", output_dir.display()))?;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output: {}", output_dir.display()))?;

    let mut overlays = std::fs::read_dir(mods_dir)
        .with_context(|| format!("reading {}", mods_dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("reading {}", mods_dir.display()))?;
    overlays.sort_by_key(std::fs::DirEntry::file_name);

    let mut report = BuildReport::default();
    for overlay in overlays {
        let path = overlay.path();
        let name = overlay.file_name();
        let name = name.to_string_lossy();

        if path.is_dir() {
            log.info(&format!("processing mod: {name}"));
            report.files += merge_tree(&path, output_dir)
                .with_context(|| format!("merging {name}"))?;
            report.directories += 1;
        } else if path.is_file() && is_zip(&path) {
            log.info(&format!("processing mod: {name}"));
            report.files += merge_archive(&path, output_dir)
                .with_context(|| format!("merging {name}"))?;
            report.archives += 1;
        } else {
            log.debug(&format!("ignoring: {name}"));
            report.ignored += 1;
        }
    }
    Ok(report)
}

fn merge_archive(archive: &Path, output_dir: &Path) -> Result<usize> {
    let scratch = output_dir.join(SCRATCH_DIR_NAME);
    remove_path(&scratch)?;
    extract_zip(archive, &scratch)?;
    let files = merge_tree(&scratch, output_dir)?;
    remove_path(&scratch)?;
    Ok(files)
}

/// Rebuild the output tree from the overlays.
#[derive(Debug)]
pub struct BuildOutput;

impl Task for BuildOutput {
    fn name(&self) -> &str {
        "Build output"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let report = build_output(ctx.mods_dir(), ctx.output_dir(), ctx.log.as_ref())?;
        ctx.log.info(&format!(
            "{} folders, {} archives merged ({} files), {} ignored",
            report.directories, report.archives, report.files, report.ignored
        ));
        Ok(TaskResult::Ok)
    }
}
