//! Tree merging and metadata-preserving file copies.
use anyhow::{Context as _, Result};
use std::path::Path;

use walkdir::WalkDir;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Copy a single file, overwriting `dst`, and carry over the source's access
/// and modification times. The copy is always left writable by its owner.
///
/// # Errors
///
/// Returns an error if the file cannot be copied or its times cannot be set.
pub fn copy_file_with_metadata(src: &Path, dst: &Path) -> Result<()> {
    std::fs::copy(src, dst)
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    let meta = std::fs::metadata(src)
        .with_context(|| format!("reading metadata of {}", src.display()))?;
    ensure_owner_writable(dst, &meta)?;
    filetime::set_file_times(
        dst,
        filetime::FileTime::from_last_access_time(&meta),
        filetime::FileTime::from_last_modification_time(&meta),
    )
    .with_context(|| format!("setting times on {}", dst.display()))?;
    Ok(())
}

/// A read-only copy would make the next overlay's overwrite of `dst` fail.
#[cfg(unix)]
fn ensure_owner_writable(dst: &Path, src_meta: &std::fs::Metadata) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = src_meta.permissions().mode();
    if mode & 0o200 == 0 {
        std::fs::set_permissions(dst, std::fs::Permissions::from_mode(mode | 0o200))
            .with_context(|| format!("setting permissions on {}", dst.display()))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_owner_writable(dst: &Path, _src_meta: &std::fs::Metadata) -> Result<()> {
    let mut perms = std::fs::metadata(dst)
        .with_context(|| format!("reading metadata of {}", dst.display()))?
        .permissions();
    if perms.readonly() {
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        std::fs::set_permissions(dst, perms)
            .with_context(|| format!("setting permissions on {}", dst.display()))?;
    }
    Ok(())
}

/// Merge every file under `src` into the mirrored path under `dst`.
///
/// Directories are created as needed (existing ones are reused), existing
/// files are overwritten, and nothing under `dst` is ever deleted.
///
/// Symlinks within the source tree are *followed*: their content is copied
/// rather than the link itself.
///
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns an error if the source tree cannot be walked or any directory or
/// file cannot be written.
pub fn merge_tree(src: &Path, dst: &Path) -> Result<usize> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
        let entry = entry.with_context(|| format!("walking {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("{} is outside {}", entry.path().display(), src.display()))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("creating directory {}", target.display()))?;
        } else {
            copy_file_with_metadata(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
