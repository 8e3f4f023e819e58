//! Parsing of normalized logger CSV into a typed [`Table`].

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ConvertError, ConvertResult};
use crate::processing::reshape::{self, ColumnPlan};
use crate::types::{DataType, Field, Schema, Table, Value, FECHA, HORA};

use super::normalize::NormalizedText;
use super::timestamp;

/// Options controlling how the header is interpreted and which cells count as missing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    /// Column holding the combined `"date, time"` timestamp.
    pub timestamp_column: String,
    /// Columns removed from the output when present.
    pub excluded_columns: Vec<String>,
    /// Cell contents (compared case-insensitively) that mean "no reading". Empty cells are
    /// always null.
    pub null_markers: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            timestamp_column: "Timestamp".to_string(),
            excluded_columns: vec!["CS320_Temp_Avg".to_string()],
            null_markers: ["NAN", "NA", "N/A", "NULL", "None", "#N/A"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl ParseOptions {
    /// Load options from a JSON file. Missing keys fall back to [`ParseOptions::default`].
    ///
    /// ```json
    /// { "excluded_columns": ["CS320_Temp_Avg", "BattV_Min"] }
    /// ```
    pub fn from_json_path(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn is_null(&self, trimmed: &str) -> bool {
        trimmed.is_empty()
            || self
                .null_markers
                .iter()
                .any(|m| m.eq_ignore_ascii_case(trimmed))
    }
}

/// Parse normalized text into a [`Table`] whose first columns are [`FECHA`] and [`HORA`].
///
/// Rules:
///
/// - The first line is the header; names are stripped of quotes and whitespace.
/// - The timestamp column is split into date and time, both parsed strictly.
/// - The timestamp column and any excluded columns are dropped.
/// - Every other column becomes [`DataType::Number`] when all its non-null cells are decimal
///   numbers, otherwise [`DataType::Text`].
///
/// Any unparseable date or time aborts the whole parse.
pub fn parse(text: &NormalizedText, options: &ParseOptions) -> ConvertResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_str().as_bytes());
    parse_csv_from_reader(&mut rdr, options)
}

/// Parse records from an existing CSV reader (which must be configured with headers).
pub fn parse_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &ParseOptions,
) -> ConvertResult<Table> {
    let headers: Vec<String> = rdr.headers()?.iter().map(clean_header).collect();

    let ts_idx = headers
        .iter()
        .position(|h| *h == options.timestamp_column)
        .ok_or_else(|| ConvertError::Schema {
            message: format!(
                "missing required column '{}'. headers={:?}",
                options.timestamp_column, headers
            ),
        })?;

    let plan = ColumnPlan::new(&headers, ts_idx, &options.excluded_columns);

    let mut stamps = Vec::new();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); plan.kept.len()];
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        if record.len() > headers.len() {
            return Err(ConvertError::Format {
                line: user_row,
                message: format!(
                    "record has {} fields but the header has {}",
                    record.len(),
                    headers.len()
                ),
            });
        }

        let (date_raw, time_raw) = timestamp::split_timestamp(record.get(ts_idx).unwrap_or(""));
        let date = timestamp::parse_date(user_row, date_raw)?;
        let time = timestamp::parse_time(user_row, time_raw)?;
        stamps.push((date, time));

        for (col, &src_idx) in cells.iter_mut().zip(plan.kept.iter()) {
            let raw = record.get(src_idx).unwrap_or("").trim();
            col.push((!options.is_null(raw)).then(|| raw.to_owned()));
        }
    }

    if stamps.is_empty() {
        return Err(ConvertError::Format {
            line: 1,
            message: "no data rows after the header".to_string(),
        });
    }

    let column_types: Vec<DataType> = cells.iter().map(|col| infer_column_type(col)).collect();

    let mut fields = vec![Field::new(FECHA, DataType::Date), Field::new(HORA, DataType::Time)];
    fields.extend(
        plan.kept
            .iter()
            .zip(column_types.iter())
            .map(|(&idx, &data_type)| Field::new(headers[idx].clone(), data_type)),
    );

    let mut columns: Vec<_> = cells.into_iter().map(Vec::into_iter).collect();
    let mut rows = Vec::with_capacity(stamps.len());
    for (date, time) in stamps {
        let mut row = Vec::with_capacity(fields.len());
        row.push(Value::Date(date));
        row.push(Value::Time(time));
        for (col, &data_type) in columns.iter_mut().zip(column_types.iter()) {
            row.push(typed_value(data_type, col.next().flatten()));
        }
        rows.push(row);
    }

    let table = Table::new(Schema::new(fields), rows);
    debug_assert!(reshape::has_canonical_prefix(&table.schema));
    tracing::debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        dropped = ?plan.dropped,
        "parsed logger table"
    );
    Ok(table)
}

fn clean_header(h: &str) -> String {
    h.trim().trim_matches('"').trim().to_string()
}

fn infer_column_type(cells: &[Option<String>]) -> DataType {
    if cells.iter().flatten().all(|raw| parse_number(raw).is_some()) {
        DataType::Number
    } else {
        DataType::Text
    }
}

fn typed_value(data_type: DataType, raw: Option<String>) -> Value {
    let Some(raw) = raw else {
        return Value::Null;
    };
    match data_type {
        DataType::Number => parse_number(&raw).map(Value::Number).unwrap_or(Value::Text(raw)),
        _ => Value::Text(raw),
    }
}

/// Plain decimal literal: optional sign, digits, optionally a period and more digits.
/// `Decimal::from_str` is more lenient (underscores), so the shape is checked first.
fn parse_number(raw: &str) -> Option<Decimal> {
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let unsigned = raw.strip_prefix('-').unwrap_or(raw);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(int) || frac.is_some_and(|f| !digits(f)) {
        return None;
    }
    Decimal::from_str(raw).ok()
}
