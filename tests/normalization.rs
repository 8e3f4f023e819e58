use rainfall_sql::ingestion::normalize;
use rainfall_sql::ConvertError;

#[test]
fn normalize_example_line() {
    let out = normalize("\"25/12/2023, 08:30:00 p. m.\",1.392,410").unwrap();
    assert_eq!(out.as_str(), "\"25/12/2023, 08:30:00 PM\",1392.410");
}

#[test]
fn normalize_is_idempotent_on_normalized_text() {
    let inputs = [
        "\"Timestamp\",\"Rain\"\n\"25/12/2023, 08:30:00 p. m.\",1.392,410",
        "\"Timestamp\",\"Rain\",\"Temp\"\n\"25/12/2023, 08:30:00 a.m.\",884,750,19,25",
        "Timestamp,Rain\n\"01/01/2024, 00:00:00\",0,2",
    ];
    for raw in inputs {
        let once = normalize(raw).unwrap();
        let twice = normalize(once.as_str()).unwrap();
        assert_eq!(once, twice, "not idempotent for {raw:?}");
    }
}

#[test]
fn header_lines_pass_through_unchanged() {
    let raw = "  Timestamp,Rain_mm_Tot,\"Vol,1.000\"\n\"25/12/2023, 08:30:00 PM\",3,5\n";
    let out = normalize(raw).unwrap();
    let mut lines = out.as_str().lines();
    assert_eq!(lines.next(), Some("Timestamp,Rain_mm_Tot,\"Vol,1.000\""));
    assert_eq!(lines.next(), Some("\"25/12/2023, 08:30:00 PM\",3.5"));
    assert_eq!(lines.next(), None);
}

#[test]
fn timestamp_field_is_never_rewritten() {
    // The comma inside the timestamp sits between digits but must survive.
    let out = normalize("\"1/2/2024,1:02:03\",4,5").unwrap();
    assert_eq!(out.as_str(), "\"1/2/2024,1:02:03\",4.5");
}

#[test]
fn blank_lines_and_crlf_are_dropped() {
    let raw = "Timestamp,Rain\r\n\r\n\"25/12/2023, 08:30:00 PM\",1,5\r\n\r\n\"25/12/2023, 08:45:00 PM\",2,0\r\n";
    let out = normalize(raw).unwrap();
    assert_eq!(
        out.as_str(),
        "Timestamp,Rain\n\"25/12/2023, 08:30:00 PM\",1.5\n\"25/12/2023, 08:45:00 PM\",2.0"
    );
    assert_eq!(out.line_count(), 3);
}

#[test]
fn fewer_than_three_digits_after_period_is_kept() {
    let out = normalize("\"25/12/2023, 08:30:00 PM\",1.39,4").unwrap();
    assert_eq!(out.as_str(), "\"25/12/2023, 08:30:00 PM\",1.39,4");
}

#[test]
fn blank_input_is_rejected() {
    assert!(matches!(normalize("   \n\t "), Err(ConvertError::EmptyInput)));
}

#[test]
fn text_glued_to_timestamp_is_a_format_error() {
    let err = normalize("Timestamp,Rain\n\"25/12/2023, 08:30:00 PM\"x,1").unwrap_err();
    match err {
        ConvertError::Format { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("after quoted timestamp"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn decimals_followed_by_more_measurements_stay_stable() {
    let cases = [
        (
            "\"25/12/2023, 08:30:00 p. m.\",1.392,410,12",
            "\"25/12/2023, 08:30:00 PM\",1392.410,12",
        ),
        (
            "\"25/12/2023, 08:30:00 p. m.\",0,254,12",
            "\"25/12/2023, 08:30:00 PM\",0.254,12",
        ),
    ];
    for (raw, expected) in cases {
        let once = normalize(raw).unwrap();
        assert_eq!(once.as_str(), expected);
        let twice = normalize(once.as_str()).unwrap();
        assert_eq!(twice, once, "second pass changed {raw:?}");
    }
}

#[test]
fn leading_zero_or_long_integer_part_is_not_a_thousands_group() {
    let out = normalize("\"25/12/2023, 08:30:00 PM\",0.254,1392.410,7").unwrap();
    assert_eq!(out.as_str(), "\"25/12/2023, 08:30:00 PM\",0.254,1392.410,7");
}
