//! Configuration error types.
//!
//! Configuration loading returns [`ConfigError`]; command handlers at the CLI
//! boundary convert it to [`anyhow::Error`] via the standard `?` operator.
//! Filesystem failures raised by the merge/deploy primitives live in
//! [`crate::resources::error::ResourceError`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while resolving and loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No root directory was given and none could be detected.
    #[error("cannot determine modmerge root; use --root or set MODMERGE_ROOT")]
    RootNotFound,

    /// A managed top-level name is empty or is not a single plain component.
    #[error("invalid managed folder name '{0}': must be a single path component")]
    InvalidManagedName(String),

    /// The configuration file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("invalid TOML in {path}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn invalid_managed_name_display() {
        let e = ConfigError::InvalidManagedName("../etc".to_string());
        assert_eq!(
            e.to_string(),
            "invalid managed folder name '../etc': must be a single path component"
        );
    }

    #[test]
    fn io_display_and_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("/root/modmerge.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/root/modmerge.toml"));
        assert!(e.source().is_some());
    }

    #[test]
    fn invalid_syntax_display() {
        let e = ConfigError::InvalidSyntax {
            path: PathBuf::from("modmerge.toml"),
            message: "expected `=`".to_string(),
        };
        assert_eq!(e.to_string(), "invalid TOML in modmerge.toml: expected `=`");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn config_error_is_send_sync() {
        assert_send_sync::<ConfigError>();
        let _anyhow_err: anyhow::Error = ConfigError::RootNotFound.into();
    }
}
