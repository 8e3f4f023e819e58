//! Output side of a conversion: SQL literal rendering and the file sink.
//!
//! - [`sql`]: turns a [`crate::types::Table`] into `(...),\n(...);` text
//! - [`file`]: output file naming and atomic writes used by the CLI

pub mod file;
pub mod sql;

pub use file::{next_output_path, write_output};
pub use sql::{render_tuple, to_sql_values};
