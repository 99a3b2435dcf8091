use common::{at, draft, open_store};
use parking_permits::normalize_registration_number;
use serde_json::json;
use std::collections::BTreeSet;

mod common;

/// Verify registration numbers that differ only in case, spacing or punctuation normalize identically.
#[test]
fn test_normalization_is_format_insensitive() {
    let canonical = normalize_registration_number("ABC123");

    for variant in ["abc123", "ABC 123", "abc-123", " a.b.c 1-2-3 "] {
        assert_eq!(normalize_registration_number(variant), canonical, "{variant}");
    }
    assert_ne!(normalize_registration_number("ABC124"), canonical);
}

/// Verify `by_subject` finds a permit iff it has a row for the normalized registration.
#[test]
fn test_subject_lookup_matches_normalized_rows() {
    let (store, _temp) = open_store();
    let series = store.create_series(at(1, 0)).unwrap();
    let with_row = store
        .save_permit(
            &draft(
                series.id,
                json!([{"registration_number": "abc 123", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-10T00:00:00Z"}]),
                json!([{"area": "A1", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-10T00:00:00Z"}]),
            ),
            at(1, 0),
        )
        .unwrap();
    // Listed as a subject, but its interval never meets the area's
    store
        .save_permit(
            &draft(
                series.id,
                json!([{"registration_number": "ABC-123", "start_time": "2023-01-20T00:00:00Z", "end_time": "2023-01-25T00:00:00Z"}]),
                json!([{"area": "A1", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-10T00:00:00Z"}]),
            ),
            at(1, 0),
        )
        .unwrap();

    let ids = store.query().by_subject("Abc-123").ids().unwrap();

    assert_eq!(ids, BTreeSet::from([with_row.id]));
}

/// Verify area and time lookups compose with the active-series restriction.
#[test]
fn test_active_composition() {
    let (store, _temp) = open_store();
    let inactive = store.create_series(at(1, 0)).unwrap();
    let active = store.create_series(at(1, 0)).unwrap();
    let lists = || {
        (
            json!([{"registration_number": "ABC-123", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-10T00:00:00Z"}]),
            json!([{"area": "A1", "start_time": "2023-01-01T00:00:00Z", "end_time": "2023-01-10T00:00:00Z"}]),
        )
    };
    let (subjects, areas) = lists();
    store
        .save_permit(&draft(inactive.id, subjects, areas), at(1, 0))
        .unwrap();
    let (subjects, areas) = lists();
    let current = store
        .save_permit(&draft(active.id, subjects, areas), at(1, 0))
        .unwrap();
    store.activate_series(active.id, at(2, 0)).unwrap();

    assert_eq!(store.query().by_area("A1").ids().unwrap().len(), 2);
    assert_eq!(store.query().by_time(at(5, 0)).ids().unwrap().len(), 2);

    let permits = store.query().by_area("A1").active().run().unwrap();
    assert_eq!(permits.len(), 1);
    assert_eq!(permits[0].id, current.id);

    let permits = store.query().active().by_time(at(5, 0)).run().unwrap();
    assert_eq!(permits.len(), 1);
    assert_eq!(permits[0].id, current.id);
}

/// Verify an unknown area or an unmatched time returns nothing rather than failing.
#[test]
fn test_empty_results() {
    let (store, _temp) = open_store();

    assert!(store.query().by_area("NOPE").run().unwrap().is_empty());
    assert!(store.query().by_time(at(1, 0)).run().unwrap().is_empty());
    assert!(store.query().active().run().unwrap().is_empty());
}
