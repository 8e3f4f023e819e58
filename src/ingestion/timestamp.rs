//! Splitting and parsing of the logger's combined `"dd/mm/yyyy, hh:mm:ss PM"` timestamp.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{ConvertError, ConvertResult};

/// Accepted date layout (day/month/four-digit year).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A time layout tried by [`parse_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormat {
    /// chrono `strftime` pattern.
    pub pattern: &'static str,
    /// Example literal, used in error messages.
    pub example: &'static str,
}

/// Time layouts in priority order; the first one that parses wins.
pub const TIME_FORMATS: [TimeFormat; 3] = [
    TimeFormat {
        pattern: "%I:%M:%S %p",
        example: "08:30:00 PM",
    },
    TimeFormat {
        pattern: "%H:%M:%S",
        example: "20:30:00",
    },
    TimeFormat {
        pattern: "%I:%M:%S%p",
        example: "08:30:00PM",
    },
];

/// Split a combined timestamp on its internal comma into trimmed date and time halves.
///
/// A timestamp without a comma yields an empty time half, which [`parse_time`] rejects.
pub fn split_timestamp(raw: &str) -> (&str, &str) {
    let (date, time) = raw.split_once(',').unwrap_or((raw, ""));
    (strip_field(date), strip_field(time))
}

fn strip_field(s: &str) -> &str {
    s.trim_matches(|c: char| c == '"' || c.is_whitespace())
}

/// Parse the date half (`25/12/2023`). `row` is only used for the error.
pub fn parse_date(row: usize, raw: &str) -> ConvertResult<NaiveDate> {
    let err = || ConvertError::DateFormat {
        row,
        value: raw.to_owned(),
        format: DATE_FORMAT,
    };

    // chrono's %Y also takes short or signed years; the logger always writes four digits.
    let year = raw.rsplit('/').next().unwrap_or("");
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| err())
}

/// Parse the time half by trying [`TIME_FORMATS`] in order.
pub fn parse_time(row: usize, raw: &str) -> ConvertResult<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt.pattern).ok())
        .ok_or_else(|| ConvertError::TimeFormat {
            row,
            value: raw.to_owned(),
            formats: TIME_FORMATS.iter().map(|f| f.pattern).collect(),
        })
}
