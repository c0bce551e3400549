//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Event target for section headers.
pub(super) const STAGE_TARGET: &str = "modmerge::stage";
/// Event target for dry-run actions.
pub(super) const DRY_RUN_TARGET: &str = "modmerge::dry_run";

/// How an event is rendered, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Stage,
    DryRun,
    Info,
    Debug,
    Warn,
    Error,
}

impl EventKind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => Self::Error,
            (tracing::Level::WARN, _) => Self::Warn,
            (tracing::Level::INFO, STAGE_TARGET) => Self::Stage,
            (tracing::Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (tracing::Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Plain-text prefix used in the log file.
    const fn file_prefix(self) -> &'static str {
        match self {
            Self::Stage => "==> ",
            Self::DryRun => "    [dry run] ",
            Self::Info => "    ",
            Self::Debug => "    [debug] ",
            Self::Warn => "    [warn] ",
            Self::Error => "    [error] ",
        }
    }
}

/// Pulls the `message` field out of an event.
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Appends every event to the per-command log file, timestamped and with
/// ANSI codes stripped.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command` and write a run header.
    ///
    /// Returns `None` if the cache directory or file is unavailable.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let header = format!(
            "modmerge {} {} {}\n",
            crate::commands::version::version(),
            command,
            format_utc_datetime(),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let kind = EventKind::of(event.metadata());
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let line = format!(
            "[{}] {}{}",
            format_utc_time(),
            kind.file_prefix(),
            strip_ansi(&extractor.message)
        );

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Compact console rendering of [`EventKind`]s.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match EventKind::of(event.metadata()) {
            EventKind::Error => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            EventKind::Warn => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            EventKind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            EventKind::DryRun => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            EventKind::Info => writeln!(writer, "  {msg}"),
            EventKind::Debug => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Sets up a console layer (warnings and errors on stderr, the rest on
/// stdout) and a file layer that writes all events, including `debug`, to
/// `$XDG_CACHE_HOME/modmerge/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
