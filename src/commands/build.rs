//! Build command: rebuild the output tree without deploying.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::tasks::Task;
use crate::tasks::build::BuildOutput;

/// Run the build command.
///
/// # Errors
///
/// Returns an error if configuration loading or the build fails.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let runner = super::CommandRunner::new(global, log)?;
    runner.run([&BuildOutput as &dyn Task])
}
