//! One conversion request: normalize, parse, sort, serialize.
//!
//! Most callers should use [`convert`], which turns pasted logger text into the SQL `VALUES`
//! text in one call. Every stage runs to completion before the next starts and the first error
//! aborts the request, so callers either get the full output or an error, never a prefix.
//!
//! If a [`ConversionObserver`] is configured, success/failure/alerts are reported to it.

use std::fmt;
use std::sync::Arc;

use crate::error::ConvertResult;
use crate::export::sql;
use crate::ingestion::{normalize, parse, ParseOptions};
use crate::observability::{ConversionContext, ConversionObserver, ConversionSeverity, ConversionStats};
use crate::processing::sort_by_timestamp;
use crate::types::Table;

/// Options controlling a conversion.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ConvertOptions {
    /// Header interpretation and null handling.
    pub parse: ParseOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ConversionSeverity,
}

impl fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertOptions")
            .field("parse", &self.parse)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            observer: None,
            alert_at_or_above: ConversionSeverity::Critical,
        }
    }
}

/// Normalize and parse `raw`, returning the table sorted by (`Fecha`, `Hora`).
pub fn read_table(raw: &str, options: &ParseOptions) -> ConvertResult<Table> {
    let normalized = normalize(raw)?;
    tracing::debug!(lines = normalized.line_count(), "normalized input");
    let mut table = parse(&normalized, options)?;
    sort_by_timestamp(&mut table);
    Ok(table)
}

/// Convert pasted logger text into SQL `VALUES` tuples.
///
/// ```rust
/// use rainfall_sql::pipeline::{convert, ConvertOptions};
///
/// # fn main() -> Result<(), rainfall_sql::ConvertError> {
/// let raw = "\"Timestamp\",\"Rain_mm_Tot\"\n\
///            \"25/12/2023, 08:30:00 p. m.\",1.392,410\n\
///            \"25/12/2023, 08:15:00 p. m.\",0,2";
/// let sql = convert(raw, &ConvertOptions::default())?;
/// assert_eq!(
///     sql,
///     "('2023-12-25','20:15:00',0.2),\n('2023-12-25','20:30:00',1392.410);"
/// );
/// # Ok(())
/// # }
/// ```
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn convert(raw: &str, options: &ConvertOptions) -> ConvertResult<String> {
    convert_from_source("<input>", raw, options)
}

/// Same as [`convert`], labelling observer events with `source` (typically a file path).
pub fn convert_from_source(source: &str, raw: &str, options: &ConvertOptions) -> ConvertResult<String> {
    let span = tracing::info_span!("convert", source);
    let _entered = span.enter();

    let ctx = ConversionContext {
        source: source.to_string(),
        input_bytes: raw.len(),
    };

    let result = read_table(raw, &options.parse).map(|table| {
        let stats = ConversionStats {
            rows: table.row_count(),
            columns: table.column_count(),
        };
        (sql::to_sql_values(&table), stats)
    });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((_, stats)) => obs.on_success(&ctx, *stats),
            Err(e) => {
                let sev = ConversionSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(out, _)| out)
}

/// Convenience helper for callers that want an owned request object.
#[derive(Clone)]
pub struct ConversionRequest {
    /// Label reported to observers.
    pub source: String,
    /// Raw pasted text.
    pub input: String,
    /// Options controlling the conversion.
    pub options: ConvertOptions,
}

impl fmt::Debug for ConversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRequest")
            .field("source", &self.source)
            .field("input_bytes", &self.input.len())
            .field("options", &self.options)
            .finish()
    }
}

impl ConversionRequest {
    /// Execute the request by calling [`convert_from_source`].
    pub fn run(&self) -> ConvertResult<String> {
        convert_from_source(&self.source, &self.input, &self.options)
    }
}
