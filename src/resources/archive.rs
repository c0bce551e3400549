//! Zip overlay extraction.
use anyhow::{Context as _, Result};
use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use super::error::ResourceError;

/// Returns `true` if `path` has a `.zip` extension (any case).
#[must_use]
pub fn is_zip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Expand every entry of the zip at `archive_path` into `extract_to`,
/// preserving the entries' relative paths.
///
/// Entries whose names would escape `extract_to` (absolute paths or `..`)
/// are skipped. Unix permission bits stored in the archive are applied, with
/// the owner-write bit always set.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns [`ResourceError::ArchiveFormat`] if the file is not a valid zip
/// stream, or an I/O error if an entry cannot be written.
pub fn extract_zip(archive_path: &Path, extract_to: &Path) -> Result<usize> {
    let file = File::open(archive_path)
        .with_context(|| format!("opening archive {}", archive_path.display()))?;
    let format_err = |source| ResourceError::ArchiveFormat {
        archive: archive_path.to_path_buf(),
        source,
    };
    let mut archive = ZipArchive::new(file).map_err(format_err)?;

    std::fs::create_dir_all(extract_to)
        .with_context(|| format!("creating directory {}", extract_to.display()))?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(format_err)?;
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let full_path = extract_to.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&full_path)
                .with_context(|| format!("creating directory {}", full_path.display()))?;
            continue;
        }

        super::fs::ensure_parent_dir(&full_path)?;
        let mut dest = File::create(&full_path)
            .with_context(|| format!("creating {}", full_path.display()))?;
        std::io::copy(&mut entry, &mut dest)
            .with_context(|| format!("extracting {}", full_path.display()))?;
        written += 1;

        // Owner-write is forced so a later overlay can overwrite the file.
        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            let mode = mode | 0o200;
            std::fs::set_permissions(&full_path, std::fs::Permissions::from_mode(mode))
                .with_context(|| format!("setting permissions on {}", full_path.display()))?;
        }
    }
    Ok(written)
}
