//! Deploy command: place the existing output tree into the target.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::tasks::Task;
use crate::tasks::deploy::DeployOutput;

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if configuration loading or the deploy fails.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let runner = super::CommandRunner::new(global, log)?;
    runner.run([&DeployOutput as &dyn Task])
}
