//! The production [`Log`] sink: tracing events plus a task summary.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::log_file_path;

const RESET: &str = "\x1b[0m";

/// Emits every message as a [`tracing`] event and keeps the task results
/// for [`Logger::print_summary`].
///
/// The events reach the console and `$XDG_CACHE_HOME/modmerge/<command>.log`
/// through the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`; only the log file path is remembered.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    fn entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Number of tasks recorded as [`TaskStatus::Failed`].
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .count()
    }

    /// Print one line per recorded task, the totals, and the log file path.
    ///
    /// Does nothing when no task was recorded.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");
        for entry in &entries {
            let (glyph, colour) = entry.status.badge();
            let detail = entry
                .message
                .as_deref()
                .map(|m| format!(" ({m})"))
                .unwrap_or_default();
            self.info(&format!("{colour}{glyph} {}{detail}{RESET}", entry.name));
        }

        println!();
        let totals: Vec<String> = TaskStatus::ALL
            .iter()
            .map(|&status| {
                let n = entries.iter().filter(|e| e.status == status).count();
                format!("{}{n} {}{RESET}", status.badge().1, status.label())
            })
            .collect();
        self.info(&format!("{} tasks: {}", entries.len(), totals.join(", ")));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}{RESET}", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;
    use std::path::Path;

    fn log_contents(cache: &Path) -> String {
        fs::read_to_string(cache.join("modmerge/test.log")).unwrap()
    }

    #[test]
    fn new_logger_has_no_tasks() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.entries().is_empty());
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn record_task_keeps_message() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_task("Deploy output", TaskStatus::Skipped, Some("an earlier task failed"));
        let tasks = log.entries();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Deploy output");
        assert_eq!(tasks[0].message.as_deref(), Some("an earlier task failed"));
    }

    #[test]
    fn failure_count_only_counts_failed() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_task("a", TaskStatus::Ok, None);
        log.record_task("b", TaskStatus::Failed, Some("error 1"));
        log.record_task("c", TaskStatus::Failed, Some("error 2"));
        log.record_task("d", TaskStatus::Skipped, None);
        assert_eq!(log.failure_count(), 2);
    }

    #[test]
    fn log_file_has_run_header() {
        let (_log, tmp, _guard) = isolated_logger();
        assert!(log_contents(tmp.path()).contains("modmerge "));
    }

    #[test]
    fn levels_are_tagged_in_file() {
        let (log, tmp, _guard) = isolated_logger();
        log.debug("merging data");
        log.warn("careful");
        log.error("broken");
        log.stage("Build output");
        log.dry_run("would link data");
        let contents = log_contents(tmp.path());
        assert!(contents.contains("[debug] merging data"));
        assert!(contents.contains("[warn] careful"));
        assert!(contents.contains("[error] broken"));
        assert!(contents.contains("==> Build output"));
        assert!(contents.contains("[dry run] would link data"));
    }

    #[test]
    fn summary_is_written_to_file() {
        let (log, tmp, _guard) = isolated_logger();
        log.record_task("Build output", TaskStatus::Ok, None);
        log.record_task("Deploy output", TaskStatus::Failed, Some("denied"));
        log.print_summary();
        let contents = log_contents(tmp.path());
        assert!(contents.contains("==> Summary"));
        assert!(contents.contains("✗ Deploy output (denied)"));
        assert!(contents.contains("2 tasks: 1 ok, 0 n/a, 0 skipped, 0 dry-run, 1 failed"));
    }
}
