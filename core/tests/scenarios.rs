use chrono::TimeDelta;
use common::{at, draft, open_store};
use parking_permits::types::RegistrationNumber;
use serde_json::json;

mod common;

/// Verify a partial overlap between one subject and one area yields exactly the intersection row.
#[test]
fn test_single_overlap_produces_one_row() {
    let (store, _temp) = open_store();
    let series = store.create_series(at(1, 0)).unwrap();

    let permit = store
        .save_permit(
            &draft(
                series.id,
                json!([{"registration_number": "ABC-123", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-10T00:00:00Z"}]),
                json!([{"area": "A1", "start_time": "2023-01-05T00:00:00Z", "end_time": "2023-01-15T00:00:00Z"}]),
            ),
            at(1, 0),
        )
        .unwrap();

    let items = store.cache_items(permit.id).unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.registration_number, RegistrationNumber::normalize("ABC123"));
    assert_eq!(item.area_identifier.as_str(), "A1");
    assert_eq!(item.start_time, at(5, 0));
    assert_eq!(item.end_time, at(10, 0));
    assert_eq!(item.permit, permit.id);
}

/// Verify intervals that only touch (end == start) produce no cache rows.
#[test]
fn test_touching_intervals_produce_no_rows() {
    let (store, _temp) = open_store();
    let series = store.create_series(at(1, 0)).unwrap();

    let permit = store
        .save_permit(
            &draft(
                series.id,
                json!([{"registration_number": "X", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-01T10:00:00Z"}]),
                json!([{"area": "A", "start_time": "2023-01-01T10:00:00Z", "end_time": "2023-01-01T20:00:00Z"}]),
            ),
            at(1, 0),
        )
        .unwrap();

    assert!(store.cache_items(permit.id).unwrap().is_empty());
    assert!(!store.query().by_subject("X").exists().unwrap());
}

/// Verify pruning removes an old inactive series and keeps the active one.
#[test]
fn test_prune_removes_old_inactive_series() {
    let (store, _temp) = open_store();
    let now = at(10, 0);
    let s1 = store.create_series(now - TimeDelta::days(10)).unwrap();
    let s2 = store.create_series(now - TimeDelta::days(4)).unwrap();
    store.activate_series(s1.id, now - TimeDelta::days(5)).unwrap();

    let outcome = store.prune_series(TimeDelta::days(3), now).unwrap();

    assert_eq!(outcome.pruned, vec![s2.id]);
    assert!(outcome.skipped.is_empty());
    assert!(store.get_series(s1.id).unwrap().is_some());
    assert!(store.get_series(s2.id).unwrap().is_none());
}

/// Verify offsets in submitted timestamps are converted to UTC before intersecting.
#[test]
fn test_timestamps_with_offsets_are_normalized() {
    let (store, _temp) = open_store();
    let series = store.create_series(at(1, 0)).unwrap();

    let permit = store
        .save_permit(
            &draft(
                series.id,
                json!([{"registration_number": "ABC-123", "start_time": "2023-01-01T02:00:00+02:00", "end_time": "2023-01-02T02:00:00+02:00"}]),
                json!([{"area": "A1", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-03T00:00:00Z"}]),
            ),
            at(1, 0),
        )
        .unwrap();

    let items = store.cache_items(permit.id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].start_time, at(1, 0));
    assert_eq!(items[0].end_time, at(2, 0));
}
