use super::*;
use chrono::TimeZone;
use serde_json::json;

fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[test]
fn parses_subject_list() {
    let value = json!([
        {
            "registration_number": "ABC-123",
            "start_time": "2023-01-01T00:00:00Z",
            "end_time": "2023-01-10T00:00:00+02:00"
        }
    ]);

    let subjects = Subject::parse_list(&value).unwrap();

    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].key.as_str(), "ABC-123");
    assert_eq!(subjects[0].start_time, ts(2023, 1, 1, 0));
    assert_eq!(subjects[0].end_time, ts(2023, 1, 9, 22));
}

#[test]
fn null_is_an_empty_list() {
    assert!(AreaEntry::parse_list(&Value::Null).unwrap().is_empty());
    assert!(AreaEntry::parse_list(&json!([])).unwrap().is_empty());
}

#[test]
fn rejects_non_list() {
    let err = AreaEntry::parse_list(&json!({"area": "A1"})).unwrap_err();
    assert_eq!(err, ValidationError::NotAList { field: "areas" });
}

#[test]
fn rejects_non_object_entry() {
    let err = AreaEntry::parse_list(&json!(["A1"])).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::Entry { field: "areas", index: 0, .. }
    ));
}

#[test]
fn rejects_missing_key() {
    let value = json!([
        {"area": "A1", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-02T00:00:00Z"},
        {"area": "A2", "start_time": "2023-01-01T00:00:00Z"}
    ]);
    let err = AreaEntry::parse_list(&value).unwrap_err();
    match err {
        ValidationError::Entry { index, reason, .. } => {
            assert_eq!(index, 1);
            assert!(reason.contains("end_time"), "{reason}");
        }
        other => panic!("unexpected error {other:?}")
    }
}

#[test]
fn rejects_unknown_key() {
    let value = json!([{
        "area": "A1",
        "start_time": "2023-01-01T00:00:00Z",
        "end_time": "2023-01-02T00:00:00Z",
        "extra": 1
    }]);
    let err = AreaEntry::parse_list(&value).unwrap_err();
    assert!(err.to_string().contains("unknown key"), "{err}");
}

#[test]
fn rejects_wrong_types_and_bad_timestamps() {
    let wrong_type = json!([{
        "area": 7,
        "start_time": "2023-01-01T00:00:00Z",
        "end_time": "2023-01-02T00:00:00Z"
    }]);
    AreaEntry::parse_list(&wrong_type).unwrap_err();

    let naive = json!([{
        "registration_number": "X",
        "start_time": "2023-01-01T00:00:00",
        "end_time": "2023-01-02T00:00:00Z"
    }]);
    Subject::parse_list(&naive).unwrap_err();

    let garbage = json!([{
        "registration_number": "X",
        "start_time": "yesterday",
        "end_time": "2023-01-02T00:00:00Z"
    }]);
    Subject::parse_list(&garbage).unwrap_err();
}

#[test]
fn rejects_invalid_key_values() {
    let too_long = json!([{
        "area": "ABCDEFGHIJK",
        "start_time": "2023-01-01T00:00:00Z",
        "end_time": "2023-01-02T00:00:00Z"
    }]);
    AreaEntry::parse_list(&too_long).unwrap_err();

    let blank = json!([{
        "registration_number": "  ",
        "start_time": "2023-01-01T00:00:00Z",
        "end_time": "2023-01-02T00:00:00Z"
    }]);
    Subject::parse_list(&blank).unwrap_err();
}

#[test]
fn to_json_uses_the_list_schema() {
    let areas = vec![AreaEntry::new(
        AreaIdentifier::try_new("A1".to_string()).unwrap(),
        ts(2023, 1, 5, 0),
        ts(2023, 1, 15, 0),
    )];

    let value = AreaEntry::to_json(&areas);

    assert_eq!(
        value,
        json!([{
            "area": "A1",
            "start_time": "2023-01-05T00:00:00Z",
            "end_time": "2023-01-15T00:00:00Z"
        }])
    );
    assert_eq!(AreaEntry::parse_list(&value).unwrap(), areas);
}
