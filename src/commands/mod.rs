//! Top-level subcommand orchestration.
pub mod build;
pub mod deploy;
pub mod install;
pub mod prompt;
pub mod status;
pub mod uninstall;
pub mod version;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::config::{Config, Overrides};
use crate::error::ConfigError;
use crate::logging::{Log, Logger};
use crate::tasks::{self, Context, Task};

/// Environment variable naming the root directory.
pub const ROOT_ENV_VAR: &str = "MODMERGE_ROOT";

/// Resolved configuration shared by every command.
#[derive(Debug)]
pub struct CommandSetup {
    /// Configuration for this run.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the root directory and load the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined or the
    /// configuration file fails to load.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global)?;

        log.stage("Loading configuration");
        let overrides = Overrides {
            mods: global.mods.clone(),
            output: global.output.clone(),
            target: global.target.clone(),
        };
        let config = Config::load(&root, &overrides)?;

        log.info(&format!("root: {}", config.root.display()));
        log.debug(&format!("mods: {}", config.mods_dir.display()));
        log.debug(&format!("output: {}", config.output_dir.display()));
        log.info(&format!("target: {}", config.target_dir.display()));
        log.debug(&format!(
            "managed: {}",
            config.managed.iter().collect::<Vec<_>>().join(", ")
        ));

        Ok(Self { config })
    }
}

/// Runs a task list against a freshly loaded [`Context`].
#[derive(Debug)]
pub struct CommandRunner {
    ctx: Context,
    log: Arc<Logger>,
}

impl CommandRunner {
    /// Load configuration and build the task context.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`CommandSetup::init`].
    pub fn new(global: &GlobalOpts, log: &Arc<Logger>) -> Result<Self> {
        let setup = CommandSetup::init(global, log)?;
        let ctx = Context::new(
            setup.config,
            Arc::clone(log) as Arc<dyn Log>,
            global.dry_run,
        );
        Ok(Self {
            ctx,
            log: Arc::clone(log),
        })
    }

    /// Execute `tasks` in order and report.
    ///
    /// # Errors
    ///
    /// Returns an error if one or more tasks recorded a failure.
    pub fn run<'a>(&self, tasks: impl IntoIterator<Item = &'a dyn Task>) -> Result<()> {
        run_tasks_to_completion(tasks, &self.ctx, &self.log)
    }
}

/// Execute every task in order, print the summary, and bail if any task failed.
///
/// Tasks after a failed one are recorded as skipped instead of running.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    tasks::execute_all(tasks, ctx);

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}

/// Resolve the root directory from CLI arguments, the environment, the
/// executable's location or the current directory.
///
/// # Errors
///
/// Returns [`ConfigError::RootNotFound`] if no candidate applies.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf, ConfigError> {
    let env = std::env::var_os(ROOT_ENV_VAR).map(PathBuf::from);
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();
    resolve_root_from(global.root.as_deref(), env, exe_dir, cwd)
}

/// Pure root resolution over explicit candidates.
///
/// `--root` and the environment variable are taken as given; the
/// executable's directory and the working directory only qualify when they
/// contain a `mods/` folder.
///
/// # Errors
///
/// Returns [`ConfigError::RootNotFound`] if no candidate applies.
pub fn resolve_root_from(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
    cwd: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }
    if let Some(root) = env.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(root);
    }
    [exe_dir, cwd]
        .into_iter()
        .flatten()
        .find(|dir| dir.join("mods").is_dir())
        .ok_or(ConfigError::RootNotFound)
}
