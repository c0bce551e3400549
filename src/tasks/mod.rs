//! Named units of work that build, deploy and remove the merged tree.
pub mod build;
mod context;
pub mod deploy;
pub mod undeploy;

pub use context::Context;

use anyhow::Result;

use crate::logging::TaskStatus;

/// Outcome of a task that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task had nothing to do.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task applies to the current run.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if a build, deploy or removal step fails.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Tasks run by `install` (and by the prompt's build choice).
#[must_use]
pub fn all_install_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(build::BuildOutput), Box::new(deploy::DeployOutput)]
}

/// Tasks run by `uninstall` (and by the prompt's delete choice).
#[must_use]
pub fn all_uninstall_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(undeploy::RemoveDeployed)]
}

/// Execute a task, recording the result in the logger.
///
/// Returns the status that was recorded.
pub fn execute(task: &dyn Task, ctx: &Context) -> TaskStatus {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return TaskStatus::NotApplicable;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
            TaskStatus::Ok
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
            TaskStatus::Skipped
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
            TaskStatus::DryRun
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            TaskStatus::Failed
        }
    }
}

/// Execute tasks in order; once one fails, the rest are recorded as skipped
/// without running.
///
/// Returns the number of failed tasks.
pub fn execute_all<'a>(tasks: impl IntoIterator<Item = &'a dyn Task>, ctx: &Context) -> usize {
    let mut failed = 0;
    for task in tasks {
        if failed > 0 {
            ctx.log.record_task(
                task.name(),
                TaskStatus::Skipped,
                Some("an earlier task failed"),
            );
            continue;
        }
        if execute(task, ctx) == TaskStatus::Failed {
            failed += 1;
        }
    }
    failed
}
