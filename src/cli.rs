//! Command-line argument definitions.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "modmerge",
    about = "Merge game mod overlays into one tree and link it into the game directory",
    version
)]
pub struct Cli {
    /// Subcommand; the interactive prompt runs when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the root directory (defaults are relative to it; also MODMERGE_ROOT)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Directory holding overlay folders and .zip archives
    #[arg(long, global = true)]
    pub mods: Option<PathBuf>,

    /// Directory the merged tree is built into
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Game directory the merged tree is deployed into
    #[arg(long, global = true)]
    pub target: Option<PathBuf>,

    /// Preview deploy and undeploy changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Build the merged tree and deploy it
    Install,
    /// Build the merged tree only
    Build,
    /// Deploy the existing merged tree
    Deploy,
    /// Remove deployed folders from the game directory
    Uninstall,
    /// Show what occupies each managed folder in the game directory
    Status,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file.
    #[must_use]
    pub const fn log_name(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Build => "build",
            Self::Deploy => "deploy",
            Self::Uninstall => "uninstall",
            Self::Status => "status",
            Self::Version => "version",
        }
    }
}
