//! Core data model types for conversion.
//!
//! Parsing produces a [`Table`] whose [`Schema`] is a list of typed [`Field`]s. The first two
//! fields are always [`FECHA`] (a calendar date) and [`HORA`] (a time of day); the remaining fields
//! are the measurement columns in the order the logger exported them.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

/// Name of the derived calendar-date column.
pub const FECHA: &str = "Fecha";
/// Name of the derived time-of-day column.
pub const HORA: &str = "Hora";

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Calendar date.
    Date,
    /// Time of day with second precision.
    Time,
    /// Exact decimal number.
    Number,
    /// UTF-8 string.
    Text,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields shared by every row of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell.
///
/// The variant is decided once while parsing; serialization maps each variant to exactly one
/// literal rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Exact decimal; keeps the scale it was written with (`1392.410` stays `1392.410`).
    Number(Decimal),
    /// UTF-8 string.
    Text(String),
}

/// In-memory table produced by parsing.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Look up the cell at `row` in the column called `column`.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.index_of(column)?;
        self.rows.get(row)?.get(idx)
    }
}
