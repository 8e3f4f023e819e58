//! Input side of a conversion.
//!
//! Most callers should use [`crate::pipeline::convert`], which chains these stages. They are
//! also available individually:
//!
//! - [`normalize`]: locale cleanup of pasted text into [`NormalizedText`]
//! - [`csv`]: parsing normalized text into a typed [`crate::types::Table`]
//! - [`timestamp`]: the date and time layouts accepted inside the timestamp column

pub mod csv;
pub mod normalize;
pub mod timestamp;

pub use self::csv::{parse, parse_csv_from_reader, ParseOptions};
pub use normalize::{normalize, NormalizedText};
pub use timestamp::{TimeFormat, DATE_FORMAT, TIME_FORMATS};
