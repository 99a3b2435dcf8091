//! Derivation of cache rows from a permit's subject and area lists.

use crate::types::{AreaEntry, CacheRow, Subject};

/// Computes the validity rows of a permit.
///
/// One row per (subject, area) pair whose intervals overlap, covering
/// `[max(starts), min(ends))`. Pairs that only touch or do not meet at all
/// produce nothing. Quadratic in the list sizes, which stay small.
pub fn build_cache_rows(subjects: &[Subject], areas: &[AreaEntry]) -> Vec<CacheRow> {
    let mut rows = Vec::new();

    for area in areas {
        for subject in subjects {
            let start_time = subject.start_time.max(area.start_time);
            let end_time = subject.end_time.min(area.end_time);

            if start_time >= end_time {
                continue;
            }

            rows.push(CacheRow {
                registration_number: subject.key.normalized(),
                area_identifier: area.key.clone(),
                start_time,
                end_time,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests;
