//! Column selection and canonical ordering for parsed tables.

use crate::types::{Schema, FECHA, HORA};

/// Which source columns survive into the table, in their original relative order.
///
/// The derived [`FECHA`]/[`HORA`] columns are always placed first by the parser, so a source
/// column already named `Fecha` or `Hora` is replaced by the derived one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Source indexes of kept measurement columns.
    pub kept: Vec<usize>,
    /// Names of dropped columns (timestamp, excluded and replaced ones).
    pub dropped: Vec<String>,
}

impl ColumnPlan {
    /// Plan the output columns for `headers`, dropping the timestamp at `timestamp_idx` and
    /// every header listed in `excluded`.
    pub fn new(headers: &[String], timestamp_idx: usize, excluded: &[String]) -> Self {
        let mut kept = Vec::with_capacity(headers.len());
        let mut dropped = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            let drop = idx == timestamp_idx
                || name == FECHA
                || name == HORA
                || excluded.iter().any(|e| e == name);
            if drop {
                dropped.push(name.clone());
            } else {
                kept.push(idx);
            }
        }
        Self { kept, dropped }
    }
}

/// True when the schema starts with [`FECHA`] then [`HORA`] and neither appears again.
pub fn has_canonical_prefix(schema: &Schema) -> bool {
    let names: Vec<&str> = schema.field_names().collect();
    names.len() >= 2
        && names[0] == FECHA
        && names[1] == HORA
        && !names[2..].iter().any(|n| *n == FECHA || *n == HORA)
}
