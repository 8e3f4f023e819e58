//! Chronological ordering of parsed tables.

use chrono::{NaiveDate, NaiveTime};

use crate::types::{Table, Value};

/// Sort rows ascending by ([`crate::types::FECHA`], [`crate::types::HORA`]).
///
/// The sort is stable, so readings sharing a timestamp keep their input order. Rows whose first
/// two cells are not a date and a time sort first; the parser never produces such rows.
pub fn sort_by_timestamp(table: &mut Table) {
    table.rows.sort_by_key(|row| timestamp_key(row));
}

/// Returns a copy of `table` sorted by [`sort_by_timestamp`].
pub fn sorted_by_timestamp(table: &Table) -> Table {
    let mut out = table.clone();
    sort_by_timestamp(&mut out);
    out
}

fn timestamp_key(row: &[Value]) -> Option<(NaiveDate, NaiveTime)> {
    match row {
        [Value::Date(d), Value::Time(t), ..] => Some((*d, *t)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema, FECHA, HORA};
    use rust_decimal::Decimal;

    fn row(d: u32, h: u32, reading: i64) -> Vec<Value> {
        vec![
            Value::Date(NaiveDate::from_ymd_opt(2023, 12, d).unwrap()),
            Value::Time(NaiveTime::from_hms_opt(h, 0, 0).unwrap()),
            Value::Number(Decimal::from(reading)),
        ]
    }

    fn table(rows: Vec<Vec<Value>>) -> Table {
        Table::new(
            Schema::new(vec![
                Field::new(FECHA, DataType::Date),
                Field::new(HORA, DataType::Time),
                Field::new("Rain", DataType::Number),
            ]),
            rows,
        )
    }

    #[test]
    fn orders_by_date_then_time() {
        let t = table(vec![row(26, 1, 1), row(25, 23, 2), row(25, 8, 3)]);
        let sorted = sorted_by_timestamp(&t);
        assert_eq!(sorted.rows, vec![row(25, 8, 3), row(25, 23, 2), row(26, 1, 1)]);
        // Original unchanged
        assert_eq!(t.rows[0], row(26, 1, 1));
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let mut t = table(vec![row(25, 8, 1), row(24, 8, 9), row(25, 8, 2)]);
        sort_by_timestamp(&mut t);
        assert_eq!(t.rows, vec![row(24, 8, 9), row(25, 8, 1), row(25, 8, 2)]);
    }
}
