//! Core logging types: task entries, status, and the [`Log`] trait.

/// Task execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable task name.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Skip reason or error description, if any.
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task completed successfully.
    Ok,
    /// Task did not apply to this run (e.g. no managed names configured).
    NotApplicable,
    /// Task had nothing to do, or an earlier task failed.
    Skipped,
    /// Task ran in dry-run mode; the target was not touched.
    DryRun,
    /// Task returned an error.
    Failed,
}

impl TaskStatus {
    /// Every status, in summary order.
    pub const ALL: [Self; 5] = [
        Self::Ok,
        Self::NotApplicable,
        Self::Skipped,
        Self::DryRun,
        Self::Failed,
    ];

    /// Summary glyph and the ANSI colour it is printed in.
    #[must_use]
    pub const fn badge(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::NotApplicable => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }

    /// Label used in the summary totals line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotApplicable => "n/a",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }
}

/// Sink for progress messages and task results.
///
/// Task code logs through this trait so tests can substitute a recording
/// implementation for [`Logger`](super::logger::Logger).
pub trait Log: Send + Sync {
    /// Section header.
    fn stage(&self, msg: &str);
    /// Progress line.
    fn info(&self, msg: &str);
    /// Detail line, hidden on the console unless verbose.
    fn debug(&self, msg: &str);
    /// Warning.
    fn warn(&self, msg: &str);
    /// Error.
    fn error(&self, msg: &str);
    /// Action that would have been taken without `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Record a task result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
