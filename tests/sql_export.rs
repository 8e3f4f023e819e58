use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rainfall_sql::export::to_sql_values;
use rainfall_sql::types::{DataType, Field, Schema, Table, Value, FECHA, HORA};
use rust_decimal::Decimal;

fn schema() -> Schema {
    Schema::new(vec![
        Field::new(FECHA, DataType::Date),
        Field::new(HORA, DataType::Time),
        Field::new("Rain_mm_Tot", DataType::Number),
        Field::new("Status", DataType::Text),
    ])
}

fn row(day: u32, hour: u32, rain: Option<&str>, status: &str) -> Vec<Value> {
    vec![
        Value::Date(NaiveDate::from_ymd_opt(2023, 12, day).unwrap()),
        Value::Time(NaiveTime::from_hms_opt(hour, 30, 0).unwrap()),
        rain.map(|r| Value::Number(Decimal::from_str(r).unwrap()))
            .unwrap_or(Value::Null),
        Value::Text(status.to_string()),
    ]
}

#[test]
fn two_rows_have_one_separator_and_one_semicolon() {
    let table = Table::new(
        schema(),
        vec![row(25, 8, Some("1392.410"), "OK"), row(25, 20, Some("0.2"), "OK")],
    );
    let sql = to_sql_values(&table);
    assert_eq!(
        sql,
        "('2023-12-25','08:30:00',1392.410,'OK'),\n('2023-12-25','20:30:00',0.2,'OK');"
    );
    assert_eq!(sql.matches(",\n").count(), 1);
    assert_eq!(sql.matches(';').count(), 1);
    assert!(sql.ends_with(");"));
}

#[test]
fn null_number_renders_as_null_keyword() {
    let table = Table::new(schema(), vec![row(1, 0, None, "NAN")]);
    assert_eq!(to_sql_values(&table), "('2023-12-01','00:30:00',NULL,'NAN');");
}

#[test]
fn numbers_keep_their_scale() {
    let table = Table::new(schema(), vec![row(1, 0, Some("884.750"), "x"), row(1, 1, Some("12"), "x")]);
    let sql = to_sql_values(&table);
    assert!(sql.contains(",884.750,"));
    assert!(sql.contains(",12,"));
    assert!(!sql.contains("884.75,"));
}

#[test]
fn single_row_has_no_separator() {
    let table = Table::new(schema(), vec![row(3, 4, Some("1"), "OK")]);
    let sql = to_sql_values(&table);
    assert!(!sql.contains('\n'));
    assert!(sql.ends_with(';'));
}

#[test]
fn empty_table_renders_nothing() {
    assert_eq!(to_sql_values(&Table::new(schema(), vec![])), "");
}

/// Reads literals back (ignoring SQL syntax) and checks every typed value is recovered.
#[test]
fn literals_recover_typed_values() {
    let rows = vec![row(25, 8, Some("1392.410"), "OK"), row(26, 9, None, "LOW")];
    let table = Table::new(schema(), rows.clone());
    let sql = to_sql_values(&table);

    let decoded: Vec<Vec<Value>> = sql
        .trim_end_matches(';')
        .split(",\n")
        .map(|tuple| {
            let inner = tuple.trim_start_matches('(').trim_end_matches(')');
            inner
                .split(',')
                .zip(table.schema.fields.iter())
                .map(|(lit, field)| decode_literal(lit, field.data_type))
                .collect()
        })
        .collect();

    assert_eq!(decoded, rows);
}

fn decode_literal(lit: &str, data_type: DataType) -> Value {
    if lit == "NULL" {
        return Value::Null;
    }
    let unquoted = lit.trim_matches('\'');
    match data_type {
        DataType::Date => Value::Date(NaiveDate::parse_from_str(unquoted, "%Y-%m-%d").unwrap()),
        DataType::Time => Value::Time(NaiveTime::parse_from_str(unquoted, "%H:%M:%S").unwrap()),
        DataType::Number => Value::Number(Decimal::from_str(unquoted).unwrap()),
        DataType::Text => Value::Text(unquoted.to_string()),
    }
}
