//! Locale cleanup of pasted logger text.
//!
//! Logger exports from Spanish-locale desktops use `p. m.`/`a. m.` meridiem markers, periods as
//! thousands separators and commas as decimal separators, which collide with the CSV field
//! separator. [`normalize`] rewrites that text into plain CSV:
//!
//! 1. trim the whole input
//! 2. rewrite meridiem markers to `AM`/`PM`
//! 3. for each data line (first field quoted), clean the tail after the timestamp:
//!    drop thousands-grouping periods, then turn decimal commas into periods
//! 4. emit header/passthrough lines unchanged, drop blank lines

use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{ConvertError, ConvertResult};

fn meridiem_re() -> &'static Regex {
    static MERIDIEM_RE: OnceLock<Regex> = OnceLock::new();
    MERIDIEM_RE.get_or_init(|| {
        Regex::new(r"(?i)(^|[^\p{L}])([ap])\.\s*m\.").expect("meridiem regex must compile")
    })
}

fn data_line_re() -> &'static Regex {
    static DATA_LINE_RE: OnceLock<Regex> = OnceLock::new();
    DATA_LINE_RE.get_or_init(|| Regex::new(r#"^"([^"]+)"(.*)$"#).expect("data line regex must compile"))
}

fn decimal_comma_re() -> &'static Regex {
    static DECIMAL_COMMA_RE: OnceLock<Regex> = OnceLock::new();
    DECIMAL_COMMA_RE
        .get_or_init(|| Regex::new(r"(^|[^.\d])(\d+),(\d+)").expect("decimal comma regex must compile"))
}

/// Text that went through [`normalize`]: valid CSV with plain `AM`/`PM` markers, no thousands
/// separators and period decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Borrow the normalized CSV text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the normalized CSV text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of non-empty lines (header included).
    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize raw pasted logger text into locale-neutral CSV.
///
/// Header lines (anything whose first field is not quoted) pass through untouched. Data lines
/// keep their quoted timestamp verbatim and only the measurement tail is rewritten:
///
/// ```rust
/// use rainfall_sql::ingestion::normalize;
///
/// let out = normalize("\"25/12/2023, 08:30:00 p. m.\",1.392,410").unwrap();
/// assert_eq!(out.as_str(), "\"25/12/2023, 08:30:00 PM\",1392.410");
/// ```
///
/// A period counts as a thousands separator only when a decimal comma closes the number
/// (`1.392,410`). A grouped integer with no decimals (`1.392`) is left as the decimal `1.392`,
/// since removing that period would also rewrite already normalized values.
///
/// # Errors
///
/// - [`ConvertError::EmptyInput`] if the input is blank
/// - [`ConvertError::Format`] if a data line has trailing text glued to its timestamp
///   (`"..."x,1`), since its fields cannot be separated reliably
pub fn normalize(text: &str) -> ConvertResult<NormalizedText> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let text = rewrite_meridiem_markers(text);

    let mut lines: Vec<String> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        match data_line_re().captures(line) {
            Some(caps) => {
                let timestamp = &caps[1];
                let tail = &caps[2];
                if !tail.is_empty() && !tail.starts_with(',') {
                    return Err(ConvertError::Format {
                        line: idx + 1,
                        message: format!("unexpected text after quoted timestamp: {line:?}"),
                    });
                }
                lines.push(format!("\"{timestamp}\"{}", normalize_tail(tail)));
            }
            None => lines.push(line.to_owned()),
        }
    }

    Ok(NormalizedText(lines.join("\n")))
}

/// Rewrite `p.m.`, `p. m.`, `a.m.`, `a. m.` (any case) to `PM`/`AM`.
fn rewrite_meridiem_markers(text: &str) -> String {
    meridiem_re()
        .replace_all(text, |caps: &Captures<'_>| {
            format!("{}{}M", &caps[1], caps[2].to_ascii_uppercase())
        })
        .into_owned()
}

/// Clean the measurement tail of a data line. Grouping separators must go first: the decimal
/// comma is what identifies a preceding period as a thousands separator.
fn normalize_tail(tail: &str) -> String {
    let ungrouped = strip_grouping_separators(tail);
    decimal_comma_re()
        .replace_all(&ungrouped, "${1}${2}.${3}")
        .into_owned()
}

/// `1.392,410` -> `1392,410`; `1.234.567,8` -> `1234567,8`.
fn strip_grouping_separators(tail: &str) -> String {
    let bytes = tail.as_bytes();
    let mut out = String::with_capacity(tail.len());
    for (i, ch) in tail.char_indices() {
        if ch == '.' && is_grouping_period(bytes, i) {
            continue;
        }
        out.push(ch);
    }
    out
}

/// A period is a thousands separator when the number it belongs to opens with a 1-3 digit
/// group without a leading zero, the period is followed by exactly three digits, and that group
/// is closed by another separator or by a decimal comma. `1392.410` and `0.254` never qualify.
fn is_grouping_period(bytes: &[u8], at: usize) -> bool {
    if !has_grouping_prefix(bytes, at) {
        return false;
    }
    let end = at + 4;
    if bytes.len() < end || !bytes[at + 1..end].iter().all(u8::is_ascii_digit) {
        return false;
    }
    match bytes.get(end) {
        Some(b'.') => is_grouping_period(bytes, end),
        Some(b',') => is_decimal_comma(bytes, end),
        _ => false,
    }
}

/// Checks the digits before the period at `at`: either a leading group (1-3 digits, no leading
/// zero, starting the number) or a 3-digit group after an earlier separator.
fn has_grouping_prefix(bytes: &[u8], at: usize) -> bool {
    let run = bytes[..at].iter().rev().take_while(|b| b.is_ascii_digit()).count();
    let start = at - run;
    if start > 0 && bytes[start - 1] == b'.' {
        return run == 3 && has_grouping_prefix(bytes, start - 1);
    }
    (1..=3).contains(&run) && bytes[start] != b'0'
}

/// A comma followed by digits that are not themselves followed by a period. In already
/// normalized text (`1392.410,884.750`) the comma is a field separator and fails this test.
fn is_decimal_comma(bytes: &[u8], at: usize) -> bool {
    let digits = bytes[at + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
    digits > 0 && bytes.get(at + 1 + digits) != Some(&b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meridiem_variants_are_rewritten() {
        assert_eq!(rewrite_meridiem_markers("08:30:00 p. m."), "08:30:00 PM");
        assert_eq!(rewrite_meridiem_markers("08:30:00 p.m."), "08:30:00 PM");
        assert_eq!(rewrite_meridiem_markers("08:30:00 A. M."), "08:30:00 AM");
        assert_eq!(rewrite_meridiem_markers("08:30:00a.m."), "08:30:00AM");
    }

    #[test]
    fn meridiem_inside_words_is_left_alone() {
        assert_eq!(rewrite_meridiem_markers("cap.m. 1"), "cap.m. 1");
    }

    #[test]
    fn grouping_needs_exactly_three_digits() {
        assert_eq!(strip_grouping_separators(",1.39,4"), ",1.39,4");
        assert_eq!(strip_grouping_separators(",1.3925,4"), ",1.3925,4");
        assert_eq!(strip_grouping_separators(",1.392,4"), ",1392,4");
    }

    #[test]
    fn chained_groups_are_all_removed() {
        assert_eq!(strip_grouping_separators(",1.234.567,89"), ",1234567,89");
    }

    #[test]
    fn normalized_decimals_are_not_treated_as_groups() {
        assert_eq!(strip_grouping_separators(",1392.410"), ",1392.410");
        assert_eq!(strip_grouping_separators(",1392.410,884.750"), ",1392.410,884.750");
    }

    #[test]
    fn leading_group_must_be_short_and_nonzero() {
        assert_eq!(strip_grouping_separators(",1392.410,12"), ",1392.410,12");
        assert_eq!(strip_grouping_separators(",0.254,12"), ",0.254,12");
        assert_eq!(strip_grouping_separators(",12.345,6"), ",12345,6");
        assert_eq!(strip_grouping_separators(",1.2345.678,9"), ",1.2345.678,9");
    }

    #[test]
    fn grouped_integer_without_decimals_is_kept() {
        assert_eq!(normalize_tail(",1.392"), ",1.392");
        assert_eq!(normalize_tail(",1.392,"), ",1.392,");
    }

    #[test]
    fn tail_with_several_measurements() {
        assert_eq!(normalize_tail(",1.392,410,884,750"), ",1392.410,884.750");
        assert_eq!(normalize_tail(",0,2,,12,5"), ",0.2,,12.5");
    }

    #[test]
    fn normalized_tail_is_stable() {
        assert_eq!(normalize_tail(",1392.410,884.750"), ",1392.410,884.750");
    }
}
