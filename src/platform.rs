//! Host platform detection.
use std::fmt;

/// Detected operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Unix,
    /// Windows (NTFS reparse points, `mklink /J` junctions).
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: if cfg!(windows) { Os::Windows } else { Os::Unix },
        }
    }

    /// Whether directory junctions exist as a second aliasing mechanism.
    ///
    /// When this is `false` a native symlink is the only way to alias a
    /// directory, so a symlink failure is a hard error rather than a reason
    /// to fall back.
    #[must_use]
    pub const fn supports_junctions(&self) -> bool {
        matches!(self.os, Os::Windows)
    }
}
