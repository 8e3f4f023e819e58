//! Observer hooks for conversion outcomes.
//!
//! [`pipeline::convert_from_source`](crate::pipeline::convert_from_source) reports every request
//! to the configured [`ConversionObserver`]. A `Vec<Arc<dyn ConversionObserver>>` is itself an
//! observer and forwards each callback to its members in order.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::ConvertError;

/// How bad a failed conversion is; compared against the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConversionSeverity {
    Info,
    /// Nothing to convert (blank paste).
    Warning,
    /// The pasted text was rejected.
    Error,
    /// Reading or writing failed.
    Critical,
}

impl ConversionSeverity {
    /// Severity of a failed conversion.
    pub fn for_error(e: &ConvertError) -> Self {
        match e {
            ConvertError::Io(_) => Self::Critical,
            ConvertError::Csv(err) if matches!(err.kind(), ::csv::ErrorKind::Io(_)) => Self::Critical,
            ConvertError::EmptyInput => Self::Warning,
            _ => Self::Error,
        }
    }
}

/// What was converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionContext {
    /// Where the text came from (a path, or `<stdin>`).
    pub source: String,
    pub input_bytes: usize,
}

/// Shape of the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    /// Number of rendered tuples.
    pub rows: usize,
    /// Number of values per tuple.
    pub columns: usize,
}

/// Receives the outcome of each conversion request.
pub trait ConversionObserver: Send + Sync {
    fn on_success(&self, _ctx: &ConversionContext, _stats: ConversionStats) {}

    fn on_failure(&self, _ctx: &ConversionContext, _severity: ConversionSeverity, _error: &ConvertError) {}

    /// Called after `on_failure` when the severity reaches the alert threshold. Defaults to a
    /// second `on_failure`.
    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        self.on_failure(ctx, severity, error)
    }
}

impl ConversionObserver for Vec<Arc<dyn ConversionObserver>> {
    fn on_success(&self, ctx: &ConversionContext, stats: ConversionStats) {
        self.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        self.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        self.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Emits conversion events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ConversionObserver for TracingObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: ConversionStats) {
        tracing::info!(
            source = %ctx.source,
            input_bytes = ctx.input_bytes,
            tuples = stats.rows,
            columns = stats.columns,
            "converted paste"
        );
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        if severity <= ConversionSeverity::Warning {
            tracing::warn!(source = %ctx.source, ?severity, %error, "nothing converted");
        } else {
            tracing::error!(source = %ctx.source, ?severity, %error, "conversion rejected");
        }
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        tracing::error!(source = %ctx.source, ?severity, %error, alert = true, "conversion alert");
    }
}

/// Keeps a running history of conversions in a text file, one line per outcome:
///
/// ```text
/// 2024-01-02T10:00:00+00:00 converted source=paste.txt bytes=412 tuples=4 columns=4
/// 2024-01-02T10:05:00+00:00 rejected source=<stdin> severity=Error reason="..."
/// ```
///
/// Logging is best effort: an unwritable log never fails the conversion.
#[derive(Debug)]
pub struct EventLogObserver {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl EventLogObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn record(&self, outcome: &str, ctx: &ConversionContext, detail: &str) {
        let _guard = self.write_lock.lock();
        let line = format!(
            "{} {outcome} source={} {detail}",
            chrono::Utc::now().to_rfc3339(),
            ctx.source
        );
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{line}"));
        if let Err(error) = written {
            tracing::warn!(path = %self.path.display(), %error, "could not append to event log");
        }
    }
}

impl ConversionObserver for EventLogObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: ConversionStats) {
        let detail = format!(
            "bytes={} tuples={} columns={}",
            ctx.input_bytes, stats.rows, stats.columns
        );
        self.record("converted", ctx, &detail);
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        self.record("rejected", ctx, &format!("severity={severity:?} reason={:?}", error.to_string()));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConvertError) {
        self.record("ALERT", ctx, &format!("severity={severity:?} reason={:?}", error.to_string()));
    }
}
