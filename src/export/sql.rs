//! Rendering of tables as SQL `VALUES` tuples.

use crate::types::{Table, Value};

/// Separator placed between tuples.
pub const TUPLE_SEPARATOR: &str = ",\n";

impl Value {
    /// Render this value as a SQL literal.
    ///
    /// - [`Value::Null`] -> `NULL`
    /// - [`Value::Date`] -> `'YYYY-MM-DD'`
    /// - [`Value::Number`] -> unquoted, with the scale it was parsed with
    /// - [`Value::Time`] and [`Value::Text`] -> single-quoted text (`'20:30:00'`)
    ///
    /// Embedded apostrophes are not escaped; logger exports never contain them.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Value::Number(n) => n.to_string(),
            Value::Time(t) => format!("'{}'", t.format("%H:%M:%S")),
            Value::Text(s) => format!("'{s}'"),
        }
    }
}

/// Render one row as a parenthesized tuple: `('2023-12-25','20:30:00',1392.410)`.
pub fn render_tuple(row: &[Value]) -> String {
    let literals: Vec<String> = row.iter().map(Value::to_sql_literal).collect();
    format!("({})", literals.join(","))
}

/// Render every row of `table` as tuples joined by `,\n`, with a `;` after the last one.
///
/// Rows are rendered in table order; sort first with
/// [`crate::processing::sort_by_timestamp`]. An empty table renders as an empty string.
pub fn to_sql_values(table: &Table) -> String {
    if table.rows.is_empty() {
        return String::new();
    }
    let tuples: Vec<String> = table.rows.iter().map(|row| render_tuple(row)).collect();
    let mut out = tuples.join(TUPLE_SEPARATOR);
    out.push(';');
    out
}
