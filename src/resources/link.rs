//! Directory aliasing with a symlink → junction → copy fallback chain.
use anyhow::{Context as _, Result};
use std::fmt;
use std::path::Path;

use super::error::ResourceError;
use crate::operations::FileSystemOps;

/// How a directory ended up reachable at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMethod {
    /// Native directory symlink.
    Symlink,
    /// Windows directory junction.
    Junction,
    /// Full recursive copy.
    Copied,
}

impl fmt::Display for LinkMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Symlink => "symlink",
            Self::Junction => "junction",
            Self::Copied => "copied",
        };
        f.write_str(s)
    }
}

/// Make the directory `source` reachable at `dest`.
///
/// `source` is canonicalized first so the alias never depends on the working
/// directory. Tries a symlink, then a junction, then a recursive copy. A
/// symlink failure on a platform without junctions is returned as
/// [`ResourceError::Symlink`] instead of falling back.
///
/// `dest` must be vacant; clearing it is the caller's job.
///
/// # Errors
///
/// Returns [`ResourceError::AlreadyExists`] if `dest` is occupied,
/// [`ResourceError::Symlink`] as described above, or
/// [`ResourceError::LinkExhausted`] when every method failed.
pub fn link_dir(ops: &dyn FileSystemOps, source: &Path, dest: &Path) -> Result<LinkMethod> {
    let source = dunce::canonicalize(source)
        .with_context(|| format!("resolving {}", source.display()))?;

    if ops
        .classify(dest)
        .with_context(|| format!("inspecting {}", dest.display()))?
        .is_present()
    {
        return Err(ResourceError::AlreadyExists(dest.to_path_buf()).into());
    }

    let symlink_err = match ops.symlink_dir(&source, dest) {
        Ok(()) => return Ok(LinkMethod::Symlink),
        Err(e) if !ops.supports_junctions() => {
            return Err(ResourceError::Symlink {
                source_dir: source,
                dest: dest.to_path_buf(),
                source: e,
            }
            .into());
        }
        Err(e) => e,
    };

    let junction_err = match ops.junction(&source, dest) {
        Ok(()) => return Ok(LinkMethod::Junction),
        Err(e) => e,
    };

    ops.copy_tree(&source, dest).map_err(|copy_err| {
        anyhow::Error::from(ResourceError::LinkExhausted {
            dest: dest.to_path_buf(),
            reason: format!("symlink: {symlink_err}; junction: {junction_err:#}; copy: {copy_err:#}"),
        })
    })?;
    Ok(LinkMethod::Copied)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::{MockFileSystemOps, SystemFileSystemOps};
    use crate::resources::path_kind::PathKind;
    use std::io;

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "privilege not held")
    }

    fn source_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"aaa").unwrap();
        dir
    }

    #[test]
    fn prefers_symlink() {
        let src = source_dir();
        let mut ops = MockFileSystemOps::new();
        ops.expect_classify().returning(|_| Ok(PathKind::Absent));
        ops.expect_symlink_dir().times(1).returning(|_, _| Ok(()));
        ops.expect_junction().never();
        ops.expect_copy_tree().never();

        let method = link_dir(&ops, src.path(), Path::new("/game/data")).unwrap();
        assert_eq!(method, LinkMethod::Symlink);
    }

    #[test]
    fn falls_back_to_junction_when_symlink_denied() {
        let src = source_dir();
        let mut ops = MockFileSystemOps::new();
        ops.expect_classify().returning(|_| Ok(PathKind::Absent));
        ops.expect_symlink_dir().returning(|_, _| Err(denied()));
        ops.expect_supports_junctions().return_const(true);
        ops.expect_junction().times(1).returning(|_, _| Ok(()));
        ops.expect_copy_tree().never();

        let method = link_dir(&ops, src.path(), Path::new("/game/data")).unwrap();
        assert_eq!(method, LinkMethod::Junction);
    }

    #[test]
    fn falls_back_to_copy_when_both_aliases_fail() {
        let src = source_dir();
        let mut ops = MockFileSystemOps::new();
        ops.expect_classify().returning(|_| Ok(PathKind::Absent));
        ops.expect_symlink_dir().returning(|_, _| Err(denied()));
        ops.expect_supports_junctions().return_const(true);
        ops.expect_junction()
            .returning(|_, _| Err(anyhow::anyhow!("mklink failed")));
        ops.expect_copy_tree().times(1).returning(|_, _| Ok(()));

        let method = link_dir(&ops, src.path(), Path::new("/game/data")).unwrap();
        assert_eq!(method, LinkMethod::Copied);
    }

    #[test]
    fn copy_fallback_makes_every_file_reachable() {
        let src = source_dir();
        std::fs::create_dir(src.path().join("sub")).unwrap();
        std::fs::write(src.path().join("sub/b.txt"), b"bbb").unwrap();
        let target = tempfile::tempdir().unwrap();
        let dest = target.path().join("data");

        let system = SystemFileSystemOps::new();
        let mut ops = MockFileSystemOps::new();
        ops.expect_classify()
            .returning(|p| crate::resources::path_kind::classify(p));
        ops.expect_symlink_dir().returning(|_, _| Err(denied()));
        ops.expect_supports_junctions().return_const(true);
        ops.expect_junction()
            .returning(|_, _| Err(anyhow::anyhow!("mklink unavailable")));
        ops.expect_copy_tree()
            .returning(move |s, d| system.copy_tree(s, d));

        let method = link_dir(&ops, src.path(), &dest).unwrap();
        assert_eq!(method, LinkMethod::Copied);
        assert_eq!(std::fs::read(dest.join("a.txt")).unwrap(), b"aaa");
        assert_eq!(std::fs::read(dest.join("sub/b.txt")).unwrap(), b"bbb");
    }

    #[test]
    fn symlink_failure_propagates_without_junctions() {
        let src = source_dir();
        let mut ops = MockFileSystemOps::new();
        ops.expect_classify().returning(|_| Ok(PathKind::Absent));
        ops.expect_symlink_dir().returning(|_, _| Err(denied()));
        ops.expect_supports_junctions().return_const(false);
        ops.expect_junction().never();
        ops.expect_copy_tree().never();

        let err = link_dir(&ops, src.path(), Path::new("/game/data")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResourceError>(),
            Some(ResourceError::Symlink { .. })
        ));
    }

    #[test]
    fn all_methods_failing_is_reported() {
        let src = source_dir();
        let mut ops = MockFileSystemOps::new();
        ops.expect_classify().returning(|_| Ok(PathKind::Absent));
        ops.expect_symlink_dir().returning(|_, _| Err(denied()));
        ops.expect_supports_junctions().return_const(true);
        ops.expect_junction()
            .returning(|_, _| Err(anyhow::anyhow!("mklink failed")));
        ops.expect_copy_tree()
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));

        let err = link_dir(&ops, src.path(), Path::new("/game/data")).unwrap_err();
        let typed = err.downcast_ref::<ResourceError>();
        assert!(matches!(typed, Some(ResourceError::LinkExhausted { .. })));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn occupied_destination_is_rejected() {
        let src = source_dir();
        let mut ops = MockFileSystemOps::new();
        ops.expect_classify().returning(|_| Ok(PathKind::Directory));
        ops.expect_symlink_dir().never();

        let err = link_dir(&ops, src.path(), Path::new("/game/data")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResourceError>(),
            Some(ResourceError::AlreadyExists(_))
        ));
    }

    #[test]
    fn uninspectable_destination_is_an_error() {
        let src = source_dir();
        let mut ops = MockFileSystemOps::new();
        ops.expect_classify().returning(|_| Err(denied()));
        ops.expect_symlink_dir().never();
        ops.expect_copy_tree().never();

        let err = link_dir(&ops, src.path(), Path::new("/game/data")).unwrap_err();
        assert!(format!("{err:#}").contains("privilege not held"));
    }

    #[test]
    fn passes_canonical_source() {
        let src = source_dir();
        let canonical = dunce::canonicalize(src.path()).unwrap();
        let relative_ish = src.path().join("sub").join("..");
        std::fs::create_dir(src.path().join("sub")).unwrap();

        let mut ops = MockFileSystemOps::new();
        ops.expect_classify().returning(|_| Ok(PathKind::Absent));
        ops.expect_symlink_dir()
            .withf(move |s, _| s == canonical.as_path())
            .times(1)
            .returning(|_, _| Ok(()));

        link_dir(&ops, &relative_ish, Path::new("/game/data")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn system_ops_link_is_a_real_symlink() {
        let src = source_dir();
        let target = tempfile::tempdir().unwrap();
        let dest = target.path().join("data");

        let method = link_dir(&SystemFileSystemOps::new(), src.path(), &dest).unwrap();

        assert_eq!(method, LinkMethod::Symlink);
        assert_eq!(std::fs::read(dest.join("a.txt")).unwrap(), b"aaa");
    }

    #[test]
    fn method_display() {
        assert_eq!(LinkMethod::Symlink.to_string(), "symlink");
        assert_eq!(LinkMethod::Junction.to_string(), "junction");
        assert_eq!(LinkMethod::Copied.to_string(), "copied");
    }
}
