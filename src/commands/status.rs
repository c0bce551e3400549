//! Status command: report what occupies each managed name at the target.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::{Log as _, Logger};
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::resources::deployment::DeployedEntry;
use crate::resources::{Resource as _, ResourceState};

/// Describe the state of every managed name, in name order.
///
/// # Errors
///
/// Returns an error if a target entry cannot be inspected or a link at the
/// target cannot be read.
pub fn describe(config: &Config, ops: &Arc<dyn FileSystemOps>) -> Result<Vec<(String, String)>> {
    config
        .managed
        .iter()
        .map(|name| {
            let entry = DeployedEntry::new(
                config.output_dir.join(name),
                config.target_dir.join(name),
                Arc::clone(ops),
            );
            let text = match entry.current_state()? {
                ResourceState::Missing => "not deployed".to_string(),
                ResourceState::Correct => {
                    format!("deployed ({})", ops.classify(&entry.target)?)
                }
                ResourceState::Incorrect { current } => current,
                ResourceState::Invalid { reason } => format!("not deployed ({reason})"),
            };
            Ok::<_, anyhow::Error>((name.to_string(), text))
        })
        .collect()
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or a link cannot be read.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let ops: Arc<dyn FileSystemOps> = Arc::new(SystemFileSystemOps::new());

    log.stage("Deployment status");
    for (name, text) in describe(&setup.config, &ops)? {
        log.info(&format!("{name}: {text}"));
    }
    Ok(())
}
