//! Filesystem primitives and the check + apply pattern for deployed entries.
pub mod archive;
pub mod deployment;
pub mod error;
pub mod fs;
pub mod link;
pub mod path_kind;
pub mod remove;

use anyhow::Result;

use deployment::DeployMethod;

/// Minimal interface for resources that can be described, applied, and removed.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, or an exhausted link fallback chain.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be inspected or removed.
    fn remove(&self) -> Result<ResourceChange>;
}

/// State of a resource.
///
/// # Examples
///
/// ```
/// use modmerge_cli::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let wrong = ResourceState::Incorrect { current: "real directory".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_eq!(wrong, ResourceState::Incorrect { current: "real directory".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// What currently occupies the resource.
        current: String,
    },
    /// Resource cannot be applied.
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying or removing a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created; the method records how.
    Applied(DeployMethod),
    /// Resource was removed.
    Removed,
    /// Resource was already in the desired state (nothing to remove).
    AlreadyCorrect,
}

/// Resources that can determine their own state.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;
}
