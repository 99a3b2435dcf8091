//! The permit validity cache.
//!
//! Each stored row is one `(vehicle, area, interval)` triple derived from a
//! permit. Rows are never edited in place: a permit's whole row set is
//! dropped and rewritten inside the permit's own write transaction, so a
//! reader sees either the old set or the new one.
//!
//! Lookups go through secondary indexes and return permit ids:
//! - registration number → (permit, row)
//! - area identifier → (permit, row)
//! - (end_time, row) → (start_time, permit), scanned from the lookup time on

use crate::core::db::error::DatabaseError;
use crate::core::db::sequence;
use crate::types::record::Versioned;
use crate::types::record::latest::CacheItemRecord;
use crate::types::{CacheItemId, CacheRow, PermitCacheItem, PermitId, RegistrationNumber, TimeKey};
use chrono::{DateTime, Utc};
use redb::{
    MultimapTableDefinition, ReadTransaction, ReadableMultimapTable, ReadableTable,
    TableDefinition, WriteTransaction,
};
use std::collections::BTreeSet;

const CACHE_ITEMS: TableDefinition<u64, Versioned<CacheItemRecord>> =
    TableDefinition::new("cache_items");

/// Permit → its rows. Drives the cascade on rebuild and delete.
const PERMIT_CACHE_ITEMS: MultimapTableDefinition<u64, u64> =
    MultimapTableDefinition::new("permit_cache_items");

const BY_REGISTRATION: MultimapTableDefinition<&str, (u64, u64)> =
    MultimapTableDefinition::new("cache_by_registration");

const BY_AREA: MultimapTableDefinition<&str, (u64, u64)> =
    MultimapTableDefinition::new("cache_by_area");

/// Key is `(end_time, row)`, value is `(start_time, permit)`.
const BY_END: TableDefinition<TimeKey, TimeKey> = TableDefinition::new("cache_by_end");

/// Initializes the cache tables (creates if not exists).
pub fn init(txn: &WriteTransaction) -> Result<(), DatabaseError> {
    txn.open_table(CACHE_ITEMS)?;
    txn.open_multimap_table(PERMIT_CACHE_ITEMS)?;
    txn.open_multimap_table(BY_REGISTRATION)?;
    txn.open_multimap_table(BY_AREA)?;
    txn.open_table(BY_END)?;
    Ok(())
}

/// Replaces every row of `permit` with `rows`.
///
/// Returns the number of rows removed.
pub fn replace(
    txn: &WriteTransaction,
    permit: PermitId,
    rows: &[CacheRow],
) -> Result<usize, DatabaseError> {
    let removed = remove_permit(txn, permit)?;
    insert(txn, permit, rows)?;

    tracing::debug!(
        permit = %permit,
        removed,
        inserted = rows.len(),
        "rebuilt permit cache"
    );
    Ok(removed)
}

/// Stores `rows` for `permit` without touching existing rows.
pub fn insert(
    txn: &WriteTransaction,
    permit: PermitId,
    rows: &[CacheRow],
) -> Result<(), DatabaseError> {
    if rows.is_empty() {
        return Ok(());
    }

    let first_id = sequence::reserve(txn, sequence::CACHE_ITEM, rows.len() as u64)?;
    let permit_id = permit.into_inner();

    let mut items = txn.open_table(CACHE_ITEMS)?;
    let mut permit_items = txn.open_multimap_table(PERMIT_CACHE_ITEMS)?;
    let mut by_registration = txn.open_multimap_table(BY_REGISTRATION)?;
    let mut by_area = txn.open_multimap_table(BY_AREA)?;
    let mut by_end = txn.open_table(BY_END)?;

    for (item_id, row) in (first_id..).zip(rows) {
        let record = CacheItemRecord {
            permit,
            registration_number: row.registration_number.clone(),
            area_identifier: row.area_identifier.clone(),
            start_time: row.start_time,
            end_time: row.end_time,
        };

        items.insert(item_id, &Versioned(record))?;
        permit_items.insert(permit_id, item_id)?;
        by_registration.insert(row.registration_number.as_str(), (permit_id, item_id))?;
        by_area.insert(row.area_identifier.as_str(), (permit_id, item_id))?;
        by_end.insert(
            TimeKey::new(row.end_time, item_id),
            TimeKey::new(row.start_time, permit_id),
        )?;
    }

    Ok(())
}

/// Removes every row of `permit`. Returns the number of rows removed.
pub fn remove_permit(txn: &WriteTransaction, permit: PermitId) -> Result<usize, DatabaseError> {
    let permit_id = permit.into_inner();

    let item_ids = {
        let mut permit_items = txn.open_multimap_table(PERMIT_CACHE_ITEMS)?;
        permit_items
            .remove_all(permit_id)?
            .map(|guard| guard.map(|g| g.value()))
            .collect::<Result<Vec<u64>, _>>()?
    };

    if item_ids.is_empty() {
        return Ok(0);
    }

    let mut items = txn.open_table(CACHE_ITEMS)?;
    let mut by_registration = txn.open_multimap_table(BY_REGISTRATION)?;
    let mut by_area = txn.open_multimap_table(BY_AREA)?;
    let mut by_end = txn.open_table(BY_END)?;

    let mut removed = 0;
    for item_id in item_ids {
        let Some(record) = items.remove(item_id)?.map(|g| g.value().into_inner()) else {
            continue;
        };

        by_registration.remove(record.registration_number.as_str(), (permit_id, item_id))?;
        by_area.remove(record.area_identifier.as_str(), (permit_id, item_id))?;
        by_end.remove(TimeKey::new(record.end_time, item_id))?;
        removed += 1;
    }

    Ok(removed)
}

/// Returns the stored rows of `permit`, in insertion order.
pub fn items_of(
    txn: &ReadTransaction,
    permit: PermitId,
) -> Result<Vec<PermitCacheItem>, DatabaseError> {
    let permit_items = txn.open_multimap_table(PERMIT_CACHE_ITEMS)?;
    let items = txn.open_table(CACHE_ITEMS)?;

    let mut result = Vec::new();
    for entry in permit_items.get(permit.into_inner())? {
        let item_id = entry?.value();
        if let Some(guard) = items.get(item_id)? {
            let record = guard.value().into_inner();
            result.push(PermitCacheItem {
                id: CacheItemId::new(item_id),
                permit: record.permit,
                registration_number: record.registration_number,
                area_identifier: record.area_identifier,
                start_time: record.start_time,
                end_time: record.end_time,
            });
        }
    }

    Ok(result)
}

/// Permits with a row whose interval contains `timestamp` (inclusive on both ends).
///
/// Only rows ending at or after `timestamp` are visited, so expired history
/// costs nothing. Rows that have not started yet are still visited and skipped.
pub fn permits_at(
    txn: &ReadTransaction,
    timestamp: DateTime<Utc>,
) -> Result<BTreeSet<PermitId>, DatabaseError> {
    let by_end = txn.open_table(BY_END)?;
    let mut permits = BTreeSet::new();

    for entry in by_end.range(TimeKey::lower(timestamp)..)? {
        let (_, value) = entry?;
        let start = value.value();
        if start.timestamp <= timestamp {
            permits.insert(PermitId::new(start.id));
        }
    }

    Ok(permits)
}

/// Permits with a row for the (already normalized) registration number.
pub fn permits_for_registration(
    txn: &ReadTransaction,
    registration_number: &RegistrationNumber,
) -> Result<BTreeSet<PermitId>, DatabaseError> {
    if registration_number.is_empty() {
        return Ok(BTreeSet::new());
    }
    let by_registration = txn.open_multimap_table(BY_REGISTRATION)?;
    collect_permits(by_registration.get(registration_number.as_str())?)
}

/// Permits with a row for the area identifier.
pub fn permits_for_area(
    txn: &ReadTransaction,
    area_identifier: &str,
) -> Result<BTreeSet<PermitId>, DatabaseError> {
    let by_area = txn.open_multimap_table(BY_AREA)?;
    collect_permits(by_area.get(area_identifier)?)
}

fn collect_permits(
    values: redb::MultimapValue<'_, (u64, u64)>,
) -> Result<BTreeSet<PermitId>, DatabaseError> {
    let mut permits = BTreeSet::new();
    for entry in values {
        let (permit_id, _) = entry?.value();
        permits.insert(PermitId::new(permit_id));
    }
    Ok(permits)
}
