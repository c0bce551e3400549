//! Game mod overlay merger and deployer.
//!
//! Merges overlay folders and `.zip` archives from a mods directory into a
//! single output tree (later overlays win), then makes each top-level entry
//! of that tree available inside the game directory through a symlink, a
//! Windows junction, or a plain copy, whichever the system allows.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: resolve paths and the managed-name allow-list
//! - **[`resources`]**: filesystem primitives: classify, remove, link, merge, extract
//! - **[`tasks`]**: named units of work: build, deploy, remove deployed folders
//! - **[`commands`]**: top-level subcommand orchestration and the interactive prompt
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod platform;
pub mod resources;
pub mod tasks;
