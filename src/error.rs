use thiserror::Error;

/// Convenience result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error type returned by every conversion stage.
///
/// A single enum is shared by normalization, parsing, serialization and the output sink so that
/// one conversion request either yields its full output or exactly one of these.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Underlying I/O error (reading input, writing the output file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The normalized text could not be read as delimited records.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A parse options file could not be decoded.
    #[error("options error: {0}")]
    Options(#[from] serde_json::Error),

    /// An output directory could not be turned into a glob pattern.
    #[error("glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// Nothing but whitespace was supplied.
    #[error("input is empty: paste the logger export before converting")]
    EmptyInput,

    /// The input text is malformed beyond what normalization can repair.
    #[error("malformed input at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A required column is missing from the header.
    #[error("schema mismatch: {message}")]
    Schema { message: String },

    /// The date half of a timestamp did not match the day/month/year pattern.
    #[error("failed to parse date at row {row}: '{value}' (expected {format})")]
    DateFormat {
        row: usize,
        value: String,
        format: &'static str,
    },

    /// The time half of a timestamp matched none of the supported formats.
    #[error(
        "failed to parse time at row {row}: '{value}' (supported formats: {supported})",
        supported = .formats.join(", ")
    )]
    TimeFormat {
        row: usize,
        value: String,
        formats: Vec<&'static str>,
    },
}
