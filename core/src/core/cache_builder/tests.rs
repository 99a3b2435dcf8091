use super::*;
use crate::types::{AreaIdentifier, RegistrationNumber, SubjectRegistration};
use chrono::{DateTime, TimeZone, Utc};

mod common {
    use super::*;

    pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, day, hour, 0, 0).unwrap()
    }

    pub(super) fn subject(reg: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Subject {
        Subject::new(
            SubjectRegistration::try_new(reg.to_string()).unwrap(),
            start,
            end,
        )
    }

    pub(super) fn area(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> AreaEntry {
        AreaEntry::new(AreaIdentifier::try_new(id.to_string()).unwrap(), start, end)
    }
}

mod scenarios {
    use super::common::{area, at, subject};
    use super::*;

    #[test]
    fn test_partial_overlap_yields_intersection() {
        let subjects = [subject("ABC-123", at(1, 0), at(10, 0))];
        let areas = [area("A1", at(5, 0), at(15, 0))];

        let rows = build_cache_rows(&subjects, &areas);

        assert_eq!(
            rows,
            vec![CacheRow {
                registration_number: RegistrationNumber::normalize("ABC123"),
                area_identifier: AreaIdentifier::try_new("A1".to_string()).unwrap(),
                start_time: at(5, 0),
                end_time: at(10, 0),
            }]
        );
    }

    #[test]
    fn test_touching_intervals_yield_nothing() {
        let subjects = [subject("X", at(1, 0), at(1, 10))];
        let areas = [area("A", at(1, 10), at(1, 20))];

        assert!(build_cache_rows(&subjects, &areas).is_empty());
    }

    #[test]
    fn test_disjoint_and_inverted_intervals_yield_nothing() {
        let subjects = [
            subject("X", at(1, 0), at(2, 0)),
            subject("Y", at(9, 0), at(8, 0)),
        ];
        let areas = [area("A", at(3, 0), at(20, 0))];

        assert!(build_cache_rows(&subjects, &areas).is_empty());
    }

    #[test]
    fn test_contained_interval_is_kept_whole() {
        let subjects = [subject("X", at(1, 0), at(30, 0))];
        let areas = [area("A", at(3, 0), at(4, 0))];

        let rows = build_cache_rows(&subjects, &areas);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start_time, at(3, 0));
        assert_eq!(rows[0].end_time, at(4, 0));
    }

    #[test]
    fn test_cross_product_emits_row_per_overlapping_pair() {
        let subjects = [
            subject("abc-1", at(1, 0), at(10, 0)),
            subject("xyz 2", at(5, 0), at(6, 0)),
        ];
        let areas = [
            area("A1", at(1, 0), at(31, 0)),
            area("B2", at(8, 0), at(9, 0)),
        ];

        let rows = build_cache_rows(&subjects, &areas);

        let summary: Vec<_> = rows
            .iter()
            .map(|r| (r.registration_number.as_str(), r.area_identifier.as_str()))
            .collect();
        // xyz 2 never overlaps B2
        assert_eq!(summary, vec![("ABC1", "A1"), ("XYZ2", "A1"), ("ABC1", "B2")]);
    }

    #[test]
    fn test_empty_lists_yield_nothing() {
        let subjects = [subject("X", at(1, 0), at(2, 0))];
        let areas = [area("A", at(1, 0), at(2, 0))];

        assert!(build_cache_rows(&subjects, &[]).is_empty());
        assert!(build_cache_rows(&[], &areas).is_empty());
    }
}

mod properties {
    use super::common::{area, subject};
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    }

    fn entries() -> impl Strategy<Value = Vec<(usize, i64, i64)>> {
        prop::collection::vec((0usize..3, 0i64..48, 0i64..48), 0..6)
    }

    proptest! {
        #[test]
        fn rows_are_exactly_the_non_empty_intersections(
            raw_subjects in entries(),
            raw_areas in entries(),
        ) {
            const REGS: [&str; 3] = ["abc-123", "ABC 123", "xy-9"];
            const AREAS: [&str; 3] = ["A1", "B2", "C3"];
            let hour = |h: i64| base() + Duration::hours(h);

            let subjects: Vec<_> = raw_subjects
                .iter()
                .map(|&(r, s, e)| subject(REGS[r], hour(s), hour(e)))
                .collect();
            let areas: Vec<_> = raw_areas
                .iter()
                .map(|&(a, s, e)| area(AREAS[a], hour(s), hour(e)))
                .collect();

            let mut expected = Vec::new();
            for &(a, a_start, a_end) in &raw_areas {
                for &(r, s_start, s_end) in &raw_subjects {
                    let start = a_start.max(s_start);
                    let end = a_end.min(s_end);
                    if start < end {
                        expected.push((
                            RegistrationNumber::normalize(REGS[r]),
                            AREAS[a].to_string(),
                            hour(start),
                            hour(end),
                        ));
                    }
                }
            }

            let mut actual: Vec<_> = build_cache_rows(&subjects, &areas)
                .into_iter()
                .map(|row| {
                    prop_assert!(row.start_time < row.end_time);
                    Ok((
                        row.registration_number,
                        row.area_identifier.to_string(),
                        row.start_time,
                        row.end_time,
                    ))
                })
                .collect::<Result<_, TestCaseError>>()?;

            expected.sort();
            actual.sort();
            prop_assert_eq!(actual, expected);
        }
    }
}
