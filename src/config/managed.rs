//! The allow-list of top-level folder names managed at the deploy target.
use std::collections::BTreeSet;
use std::path::{Component, Path};

use crate::error::ConfigError;

/// Folder names deployed and removed by default.
pub const DEFAULT_MANAGED_NAMES: [&str; 6] =
    ["audio", "data", "levels", "shaders", "swfs", "textures"];

/// Closed set of top-level names the tool may create or delete at the target.
///
/// Iteration order is sorted so that undeploy output is stable.
///
/// # Examples
///
/// ```
/// use modmerge_cli::config::managed::ManagedNames;
///
/// let names = ManagedNames::default();
/// assert!(names.contains("textures"));
/// assert!(!names.contains("bin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedNames(BTreeSet<String>);

impl ManagedNames {
    /// Build a managed-name set, rejecting anything that is not a single
    /// plain path component.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidManagedName`] for empty names, names
    /// containing separators, or `.`/`..`.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            if !is_plain_component(&name) {
                return Err(ConfigError::InvalidManagedName(name));
            }
            set.insert(name);
        }
        Ok(Self(set))
    }

    /// Returns `true` if `name` is managed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Iterate the managed names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of managed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no names are managed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ManagedNames {
    fn default() -> Self {
        Self(DEFAULT_MANAGED_NAMES.iter().map(|&s| s.to_string()).collect())
    }
}

fn is_plain_component(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
