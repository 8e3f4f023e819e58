//! In-memory table transformations applied between parsing and serialization.
//!
//! Currently implemented:
//!
//! - [`reshape`]: drops the timestamp/excluded columns and fixes the `Fecha`, `Hora`, ... order
//! - [`sort_by_timestamp()`]: stable chronological sort
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use rainfall_sql::processing::sort_by_timestamp;
//! use rainfall_sql::types::{DataType, Field, Schema, Table, Value, FECHA, HORA};
//!
//! let day = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
//! let mut table = Table::new(
//!     Schema::new(vec![Field::new(FECHA, DataType::Date), Field::new(HORA, DataType::Time)]),
//!     vec![
//!         vec![Value::Date(day), Value::Time(NaiveTime::from_hms_opt(20, 30, 0).unwrap())],
//!         vec![Value::Date(day), Value::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap())],
//!     ],
//! );
//!
//! sort_by_timestamp(&mut table);
//! assert_eq!(table.rows[0][1], Value::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap()));
//! ```

pub mod reshape;
pub mod sort;

pub use reshape::ColumnPlan;
pub use sort::{sort_by_timestamp, sorted_by_timestamp};
