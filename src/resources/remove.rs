//! Remove a single node without ever destroying what a link points at.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::path_kind::{PathKind, classify};

/// Remove whatever occupies `path`.
///
/// - symlink: only the link is unlinked
/// - junction / directory symlink: the reparse node is removed with a
///   non-recursive `remove_dir`, leaving the target intact
/// - real directory: removed recursively
/// - file: unlinked
/// - nothing there: no-op
///
/// # Errors
///
/// Returns an error if the node cannot be inspected, or exists but cannot be
/// removed. No retry is attempted.
pub fn remove_path(path: &Path) -> Result<()> {
    let kind = classify(path).with_context(|| format!("inspecting {}", path.display()))?;
    match kind {
        PathKind::Absent => Ok(()),
        PathKind::Symlink | PathKind::File => std::fs::remove_file(path)
            .with_context(|| format!("removing {}", path.display())),
        PathKind::DirReparsePoint => remove_reparse_dir(path),
        PathKind::Directory => std::fs::remove_dir_all(path)
            .with_context(|| format!("removing directory {}", path.display())),
    }
}

fn remove_reparse_dir(path: &Path) -> Result<()> {
    match std::fs::remove_dir(path) {
        Ok(()) => Ok(()),
        #[cfg(windows)]
        Err(e) if e.raw_os_error() == Some(5) => remove_dir_fallback(path),
        Err(e) => {
            Err(e).with_context(|| format!("removing junction {}", path.display()))
        }
    }
}

/// Fallback removal on Windows using `cmd /c rmdir`.
///
/// A separate process holds none of this process's handles, which clears
/// some "Access is denied" failures. `rmdir` without `/s` only removes the
/// reparse node.
#[cfg(windows)]
fn remove_dir_fallback(path: &Path) -> Result<()> {
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    use std::os::windows::process::CommandExt;
    let output = std::process::Command::new("cmd")
        .arg("/c")
        .arg("rmdir")
        .arg("/q")
        .arg(path)
        .creation_flags(CREATE_NO_WINDOW)
        .output()
        .context("failed to run rmdir")?;
    if !output.status.success() {
        anyhow::bail!(
            "remove junction '{}': {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
