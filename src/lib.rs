//! `rainfall-sql` converts rain gauge logger exports pasted from a Spanish-locale desktop into
//! SQL `VALUES` tuples ready to drop into a bulk `INSERT`.
//!
//! The primary entrypoint is [`pipeline::convert`], which runs three stages in order:
//!
//! - **Normalize** ([`ingestion::normalize`]): `p. m.` -> `PM`, `1.392,410` -> `1392.410`
//! - **Parse** ([`ingestion::parse`]): split the quoted `Timestamp` into `Fecha` and `Hora`,
//!   drop housekeeping columns, type every cell
//! - **Serialize** ([`export::to_sql_values`]): one `(...)` tuple per row, `,\n` between tuples,
//!   `;` after the last
//!
//! Rows are sorted by (`Fecha`, `Hora`) before serialization. Any error aborts the whole
//! request; no partial output is ever returned.
//!
//! ## Input shape
//!
//! ```text
//! "Timestamp","Rain_mm_Tot","CS320_Temp_Avg"
//! "25/12/2023, 08:30:00 p. m.",1.392,410,21,5
//! ```
//!
//! The first line is the header. Data lines start with a quoted `dd/mm/yyyy, time` timestamp;
//! the time may be `08:30:00 PM`, `20:30:00` or `08:30:00PM`.
//!
//! ## Quick example
//!
//! ```rust
//! use rainfall_sql::pipeline::{convert, ConvertOptions};
//!
//! # fn main() -> Result<(), rainfall_sql::ConvertError> {
//! let raw = "\"Timestamp\",\"Rain_mm_Tot\",\"CS320_Temp_Avg\"\n\
//!            \"25/12/2023, 08:30:00 p. m.\",1.392,410,21,5";
//! let sql = convert(raw, &ConvertOptions::default())?;
//! assert_eq!(sql, "('2023-12-25','20:30:00',1392.410);");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: normalization, CSV parsing and timestamp formats
//! - [`processing`]: column reshaping and chronological sort
//! - [`export`]: SQL literal rendering and output files
//! - [`pipeline`]: the end-to-end conversion request
//! - [`observability`]: observer hooks for conversion outcomes
//! - [`types`]: schema + in-memory table types
//! - [`error`]: the error type shared by every stage

pub mod error;
pub mod export;
pub mod ingestion;
pub mod observability;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{ConvertError, ConvertResult};
pub use pipeline::{convert, ConvertOptions};
