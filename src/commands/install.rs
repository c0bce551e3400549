//! Install command: rebuild the output tree, then deploy it.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::{Log as _, Logger};
use crate::tasks;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any task fails. A
/// failed build leaves the target untouched.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("modmerge {}", super::version::version()));
    let runner = super::CommandRunner::new(global, log)?;
    let tasks = tasks::all_install_tasks();
    runner.run(tasks.iter().map(Box::as_ref))?;
    log.info("mod merge complete");
    Ok(())
}
