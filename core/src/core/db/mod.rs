//! Database layer for the permit store.
//!
//! This module handles all redb operations including:
//! - Series records and their creation-time index (pruning)
//! - Permit records, series membership and external id uniqueness
//! - The permit validity cache (see [`cache_table`])
//! - Permit areas
//! - Metadata storage (JSON strings)

use crate::core::db::error::DatabaseError;
use crate::error::{ConcurrencyError, IntegrityError, ValidationError};
use crate::types::metadata::MaintenanceMetadata;
use crate::types::record::Versioned;
use crate::types::record::latest::{AreaRecord, PermitRecord, SeriesRecord};
use crate::types::{
    AreaIdentifier, CacheRow, Config, MultiPolygon, Permit, PermitArea, PermitCacheItem,
    PermitDraft, PermitId, PermitSeries, RegistrationNumber, SeriesId, TimeKey,
};
use chrono::{DateTime, TimeDelta, Utc};
use redb::{
    MultimapTableDefinition, ReadTransaction, ReadableDatabase, ReadableMultimapTable,
    ReadableTable, TableDefinition, WriteTransaction,
};
use std::collections::BTreeSet;

pub mod error {
    use crate::error::{ConcurrencyError, IntegrityError, ValidationError};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Metadata error: {0}")]
        Metadata(#[from] serde_json::Error),

        #[error(transparent)]
        Validation(#[from] ValidationError),

        #[error(transparent)]
        Integrity(#[from] IntegrityError),

        #[error(transparent)]
        Concurrency(#[from] ConcurrencyError),
    }
}

pub(crate) mod cache_table;
mod sequence;

/// Series table: SeriesId → SeriesRecord
const SERIES: TableDefinition<u64, Versioned<SeriesRecord>> = TableDefinition::new("series");

/// Series ordered by creation time, scanned oldest-first when pruning.
const SERIES_CREATED: TableDefinition<TimeKey, ()> = TableDefinition::new("series_created");

/// Permit table: PermitId → PermitRecord
const PERMITS: TableDefinition<u64, Versioned<PermitRecord>> = TableDefinition::new("permits");

/// Series → permits referencing it. A series with entries here cannot be deleted.
const SERIES_PERMITS: MultimapTableDefinition<u64, u64> =
    MultimapTableDefinition::new("series_permits");

/// (series, external id) → permit
const EXTERNAL_IDS: TableDefinition<(u64, &str), u64> = TableDefinition::new("external_ids");

/// Area table: identifier → AreaRecord
const AREAS: TableDefinition<&str, Versioned<AreaRecord>> = TableDefinition::new("areas");

/// Metadata table: &str → JSON string
const METADATA_TABLE: TableDefinition<&str, &str> = TableDefinition::new("metadata");

/// Metadata key for maintenance tracking.
const METADATA_KEY_MAINTENANCE: &str = "maintenance";

/// The main database struct wrapping redb.
pub struct Database {
    db: redb::Database,
}

/// One lookup criterion. Criteria combine by intersection at permit level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Active,
    Time(DateTime<Utc>),
    Registration(RegistrationNumber),
    Area(String),
}

/// Result of an activation.
#[derive(Debug, Default)]
pub struct ActivationResult {
    /// Series that were active before and are not anymore.
    pub deactivated: Vec<SeriesId>,
}

/// Result of a prune sweep.
#[derive(Debug, Default)]
pub struct PruneResult {
    /// Series that were permanently deleted.
    pub pruned: Vec<SeriesId>,
    /// Eligible series kept because permits still reference them, with the permit count.
    pub skipped: Vec<(SeriesId, usize)>,
}

impl Database {
    /// Creates or opens a database using paths and settings from the config.
    pub fn new(config: Config) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SERIES)?;
            let _ = write_txn.open_table(SERIES_CREATED)?;
            let _ = write_txn.open_table(PERMITS)?;
            let _ = write_txn.open_multimap_table(SERIES_PERMITS)?;
            let _ = write_txn.open_table(EXTERNAL_IDS)?;
            let _ = write_txn.open_table(AREAS)?;
            let _ = write_txn.open_table(METADATA_TABLE)?;
            sequence::init(&write_txn)?;
            cache_table::init(&write_txn)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

/// Series operations.
impl Database {
    /// Creates a new, inactive series.
    pub fn create_series(&self, now: DateTime<Utc>) -> Result<PermitSeries, DatabaseError> {
        let write_txn = self.db.begin_write()?;

        let id = sequence::next(&write_txn, sequence::SERIES)?;
        let record = SeriesRecord {
            active: false,
            created_at: now,
            modified_at: now,
        };

        {
            let mut series = write_txn.open_table(SERIES)?;
            let mut created = write_txn.open_table(SERIES_CREATED)?;

            series.insert(id, &Versioned(record.clone()))?;
            created.insert(TimeKey::new(now, id), ())?;
        }

        write_txn.commit()?;
        Ok(Self::series_from_record(SeriesId::new(id), record))
    }

    pub fn get_series(&self, id: SeriesId) -> Result<Option<PermitSeries>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SERIES)?;

        Ok(table
            .get(id.into_inner())?
            .map(|g| Self::series_from_record(id, g.value().into_inner())))
    }

    /// Returns all series ordered by creation time, then id.
    pub fn list_series(&self) -> Result<Vec<PermitSeries>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let created = read_txn.open_table(SERIES_CREATED)?;
        let table = read_txn.open_table(SERIES)?;

        let mut result = Vec::new();
        for entry in created.iter()? {
            let (key, _) = entry?;
            let id = key.value().id;
            if let Some(guard) = table.get(id)? {
                result.push(Self::series_from_record(
                    SeriesId::new(id),
                    guard.value().into_inner(),
                ));
            }
        }
        Ok(result)
    }

    /// The active series with the most recent modification, if any.
    pub fn latest_active_series(&self) -> Result<Option<PermitSeries>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SERIES)?;

        let mut latest: Option<PermitSeries> = None;
        for entry in table.iter()? {
            let (key, value) = entry?;
            let series = Self::series_from_record(SeriesId::new(key.value()), value.value().0);
            if !series.active {
                continue;
            }
            if latest
                .as_ref()
                .is_none_or(|l| (series.modified_at, series.id) > (l.modified_at, l.id))
            {
                latest = Some(series);
            }
        }
        Ok(latest)
    }

    /// Makes `id` the only active series.
    ///
    /// Every other active series is deactivated in the same transaction.
    pub fn activate_series(
        &self,
        id: SeriesId,
        now: DateTime<Utc>,
    ) -> Result<ActivationResult, DatabaseError> {
        let write_txn = self.db.begin_write()?;
        let mut result = ActivationResult::default();

        {
            let mut table = write_txn.open_table(SERIES)?;

            let mut target = table
                .get(id.into_inner())?
                .map(|g| g.value().into_inner())
                .ok_or(IntegrityError::SeriesNotFound(id))?;

            let currently_active = table
                .iter()?
                .map(|entry| entry.map(|(k, v)| (k.value(), v.value().into_inner())))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .filter(|(other, record)| *other != id.into_inner() && record.active);

            for (other, mut record) in currently_active {
                record.active = false;
                record.modified_at = now;
                table.insert(other, &Versioned(record))?;
                result.deactivated.push(SeriesId::new(other));
            }

            target.active = true;
            target.modified_at = now;
            table.insert(id.into_inner(), &Versioned(target))?;
        }

        write_txn.commit()?;
        Ok(result)
    }

    /// Inactive series created before `now - retention`, oldest first.
    pub fn prunable_series(
        &self,
        retention: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<Vec<SeriesId>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let created = read_txn.open_table(SERIES_CREATED)?;
        let table = read_txn.open_table(SERIES)?;
        let cutoff = prune_cutoff(retention, now);

        let mut prunable = Vec::new();
        for entry in created.iter()? {
            let (key, _) = entry?;
            let key = key.value();
            if key.timestamp >= cutoff {
                // Index is sorted by creation time, so we can stop early
                break;
            }
            let inactive = table
                .get(key.id)?
                .is_some_and(|g| !g.value().into_inner().active);
            if inactive {
                prunable.push(SeriesId::new(key.id));
            }
        }
        Ok(prunable)
    }

    /// Deletes prunable series that no permit references anymore.
    pub fn prune_series(
        &self,
        retention: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<PruneResult, DatabaseError> {
        let write_txn = self.db.begin_write()?;
        let result = Self::prune_in(&write_txn, retention, now)?;
        write_txn.commit()?;
        Ok(result)
    }

    /// Deletes a series. Fails while permits still reference it.
    pub fn delete_series(&self, id: SeriesId) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;

        {
            let mut table = write_txn.open_table(SERIES)?;
            let series_permits = write_txn.open_multimap_table(SERIES_PERMITS)?;

            let permits = series_permits.get(id.into_inner())?.count();
            if permits > 0 {
                return Err(IntegrityError::SeriesProtected {
                    series: id,
                    permits,
                }
                .into());
            }

            let record = table
                .remove(id.into_inner())?
                .map(|g| g.value().into_inner())
                .ok_or(IntegrityError::SeriesNotFound(id))?;

            let mut created = write_txn.open_table(SERIES_CREATED)?;
            created.remove(TimeKey::new(record.created_at, id.into_inner()))?;
        }

        write_txn.commit()?;
        Ok(())
    }
}

/// Permit operations.
impl Database {
    /// Creates or updates a permit and replaces its cache rows, atomically.
    pub fn save_permit(
        &self,
        draft: &PermitDraft,
        rows: &[CacheRow],
        now: DateTime<Utc>,
    ) -> Result<Permit, DatabaseError> {
        let write_txn = self.db.begin_write()?;
        let permit = Self::write_permit(&write_txn, draft, rows, now)?;
        write_txn.commit()?;
        Ok(permit)
    }

    /// Creates many permits and their cache rows in one transaction.
    pub fn bulk_create_permits(
        &self,
        drafts: &[(PermitDraft, Vec<CacheRow>)],
        now: DateTime<Utc>,
    ) -> Result<Vec<Permit>, DatabaseError> {
        let write_txn = self.db.begin_write()?;

        let mut created = Vec::with_capacity(drafts.len());
        for (draft, rows) in drafts {
            if let Some(id) = draft.id {
                return Err(ValidationError::AlreadyPersisted(id).into());
            }
            created.push(Self::write_permit(&write_txn, draft, rows, now)?);
        }

        write_txn.commit()?;
        Ok(created)
    }

    pub fn get_permit(&self, id: PermitId) -> Result<Option<Permit>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PERMITS)?;

        Ok(table
            .get(id.into_inner())?
            .map(|g| Self::permit_from_record(id, g.value().into_inner())))
    }

    /// Ids of the permits in a series, ascending.
    pub fn permits_in_series(&self, series: SeriesId) -> Result<Vec<PermitId>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let series_permits = read_txn.open_multimap_table(SERIES_PERMITS)?;

        series_permits
            .get(series.into_inner())?
            .map(|entry| entry.map(|g| PermitId::new(g.value())).map_err(Into::into))
            .collect()
    }

    /// Deletes a permit together with its cache rows.
    pub fn delete_permit(&self, id: PermitId) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;

        {
            let mut permits = write_txn.open_table(PERMITS)?;
            let mut series_permits = write_txn.open_multimap_table(SERIES_PERMITS)?;
            let mut external_ids = write_txn.open_table(EXTERNAL_IDS)?;

            let record = permits
                .remove(id.into_inner())?
                .map(|g| g.value().into_inner())
                .ok_or(IntegrityError::PermitNotFound(id))?;

            series_permits.remove(record.series.into_inner(), id.into_inner())?;
            if let Some(external_id) = &record.external_id {
                external_ids.remove((record.series.into_inner(), external_id.as_str()))?;
            }
        }
        cache_table::remove_permit(&write_txn, id)?;

        write_txn.commit()?;
        Ok(())
    }

    pub fn cache_items(&self, permit: PermitId) -> Result<Vec<PermitCacheItem>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        cache_table::items_of(&read_txn, permit)
    }
}

/// Query operations.
impl Database {
    /// Permits matching every filter, ordered by (series, id).
    ///
    /// All filters are evaluated against one read snapshot.
    pub fn query_permits(&self, filters: &[Filter]) -> Result<Vec<Permit>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let ids = Self::matching_ids(&read_txn, filters)?;
        let table = read_txn.open_table(PERMITS)?;

        let mut permits = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(guard) = table.get(id.into_inner())? {
                permits.push(Self::permit_from_record(id, guard.value().into_inner()));
            }
        }
        permits.sort_by_key(|p| (p.series, p.id));
        Ok(permits)
    }

    /// Ids of permits matching every filter.
    pub fn query_permit_ids(&self, filters: &[Filter]) -> Result<BTreeSet<PermitId>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        Self::matching_ids(&read_txn, filters)
    }

    fn matching_ids(
        txn: &ReadTransaction,
        filters: &[Filter],
    ) -> Result<BTreeSet<PermitId>, DatabaseError> {
        let mut matched: Option<BTreeSet<PermitId>> = None;

        for filter in filters {
            if matched.as_ref().is_some_and(BTreeSet::is_empty) {
                break;
            }

            let ids = match filter {
                Filter::Active => Self::active_permit_ids(txn)?,
                Filter::Time(timestamp) => cache_table::permits_at(txn, *timestamp)?,
                Filter::Registration(registration_number) => {
                    cache_table::permits_for_registration(txn, registration_number)?
                }
                Filter::Area(area) => cache_table::permits_for_area(txn, area)?,
            };

            matched = Some(match matched {
                None => ids,
                Some(previous) => previous.intersection(&ids).copied().collect(),
            });
        }

        match matched {
            Some(ids) => Ok(ids),
            None => Self::all_permit_ids(txn),
        }
    }

    fn active_permit_ids(txn: &ReadTransaction) -> Result<BTreeSet<PermitId>, DatabaseError> {
        let series = txn.open_table(SERIES)?;
        let series_permits = txn.open_multimap_table(SERIES_PERMITS)?;

        let mut ids = BTreeSet::new();
        for entry in series.iter()? {
            let (key, value) = entry?;
            if !value.value().0.active {
                continue;
            }
            for permit in series_permits.get(key.value())? {
                ids.insert(PermitId::new(permit?.value()));
            }
        }
        Ok(ids)
    }

    fn all_permit_ids(txn: &ReadTransaction) -> Result<BTreeSet<PermitId>, DatabaseError> {
        let permits = txn.open_table(PERMITS)?;
        permits
            .iter()?
            .map(|entry| entry.map(|(k, _)| PermitId::new(k.value())).map_err(Into::into))
            .collect()
    }
}

/// Area operations.
impl Database {
    /// Inserts or replaces an area, keeping its original creation time.
    pub fn save_area(
        &self,
        identifier: &AreaIdentifier,
        name: &str,
        geometry: &MultiPolygon,
        now: DateTime<Utc>,
    ) -> Result<PermitArea, DatabaseError> {
        let write_txn = self.db.begin_write()?;
        let record;

        {
            let mut table = write_txn.open_table(AREAS)?;

            let created_at = table
                .get(identifier.as_str())?
                .map(|g| g.value().into_inner().created_at)
                .unwrap_or(now);

            record = AreaRecord {
                name: name.trim().to_string(),
                geometry: geometry.clone(),
                created_at,
                modified_at: now,
            };
            table.insert(identifier.as_str(), &Versioned(record.clone()))?;
        }

        write_txn.commit()?;
        Ok(Self::area_from_record(identifier.clone(), record))
    }

    pub fn get_area(&self, identifier: &AreaIdentifier) -> Result<Option<PermitArea>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(AREAS)?;

        Ok(table
            .get(identifier.as_str())?
            .map(|g| Self::area_from_record(identifier.clone(), g.value().into_inner())))
    }

    /// Returns all areas ordered by identifier.
    pub fn list_areas(&self) -> Result<Vec<PermitArea>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(AREAS)?;

        let mut areas = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            let identifier = AreaIdentifier::try_new(key.value().to_string())
                .map_err(|e| ValidationError::AreaIdentifier(e.to_string()))?;
            areas.push(Self::area_from_record(identifier, value.value().into_inner()));
        }
        Ok(areas)
    }
}

/// Maintenance operations.
impl Database {
    /// Prunes expired series and updates last_run_at, in one transaction.
    pub fn maintenance(
        &self,
        retention: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<PruneResult, DatabaseError> {
        let write_txn = self.db.begin_write()?;

        let result = Self::prune_in(&write_txn, retention, now)?;

        {
            let metadata = MaintenanceMetadata {
                last_run_at: Some(now),
            };
            let json = serde_json::to_string(&metadata)?;
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            meta_table.insert(METADATA_KEY_MAINTENANCE, json.as_str())?;
        }

        write_txn.commit()?;
        Ok(result)
    }

    fn get_maintenance_metadata(&self) -> Result<Option<MaintenanceMetadata>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(METADATA_TABLE)?;
        let Some(guard) = table.get(METADATA_KEY_MAINTENANCE)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(guard.value())?))
    }

    pub fn last_maintenance_at(&self) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        Ok(self
            .get_maintenance_metadata()?
            .and_then(|metadata| metadata.last_run_at))
    }

    /// Returns true if maintenance should run (never run or interval elapsed).
    pub fn should_run_maintenance(
        &self,
        now: DateTime<Utc>,
        interval: TimeDelta,
    ) -> Result<bool, DatabaseError> {
        Ok(match self.last_maintenance_at()? {
            None => true,
            Some(last) => now - last >= interval,
        })
    }
}

/// Series created strictly before this instant are old enough to prune.
///
/// A retention reaching past the representable range means nothing is old enough.
fn prune_cutoff(retention: TimeDelta, now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_signed(retention)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Internal helpers.
impl Database {
    fn write_permit(
        txn: &WriteTransaction,
        draft: &PermitDraft,
        rows: &[CacheRow],
        now: DateTime<Utc>,
    ) -> Result<Permit, DatabaseError> {
        let series_id = draft.series.into_inner();

        let (id, record) = {
            let series = txn.open_table(SERIES)?;
            if series.get(series_id)?.is_none() {
                return Err(IntegrityError::SeriesNotFound(draft.series).into());
            }

            let mut permits = txn.open_table(PERMITS)?;
            let mut series_permits = txn.open_multimap_table(SERIES_PERMITS)?;
            let mut external_ids = txn.open_table(EXTERNAL_IDS)?;

            let previous = match draft.id {
                None => None,
                Some(id) => {
                    let previous = permits
                        .get(id.into_inner())?
                        .map(|g| g.value().into_inner())
                        .ok_or(IntegrityError::PermitNotFound(id))?;

                    if let Some(expected) = draft.expected_revision
                        && expected != previous.revision
                    {
                        return Err(ConcurrencyError::StaleRevision {
                            permit: id,
                            expected,
                            actual: previous.revision,
                        }
                        .into());
                    }
                    Some((id, previous))
                }
            };

            let id = match &previous {
                Some((id, _)) => *id,
                None => PermitId::new(sequence::next(txn, sequence::PERMIT)?),
            };

            if let Some(external_id) = &draft.external_id {
                let taken_by = external_ids
                    .get((series_id, external_id.as_str()))?
                    .map(|g| g.value());
                if taken_by.is_some_and(|other| other != id.into_inner()) {
                    return Err(ValidationError::DuplicateExternalId {
                        series: draft.series,
                        external_id: external_id.to_string(),
                    }
                    .into());
                }
            }

            if let Some((_, previous)) = &previous {
                if let Some(old) = &previous.external_id {
                    external_ids.remove((previous.series.into_inner(), old.as_str()))?;
                }
                series_permits.remove(previous.series.into_inner(), id.into_inner())?;
            }

            if let Some(external_id) = &draft.external_id {
                external_ids.insert((series_id, external_id.as_str()), id.into_inner())?;
            }
            series_permits.insert(series_id, id.into_inner())?;

            let record = PermitRecord {
                series: draft.series,
                external_id: draft.external_id.clone(),
                subjects: draft.subjects.clone(),
                areas: draft.areas.clone(),
                created_at: previous.as_ref().map_or(now, |(_, p)| p.created_at),
                modified_at: now,
                revision: previous.as_ref().map_or(1, |(_, p)| p.revision + 1),
            };
            permits.insert(id.into_inner(), &Versioned(record.clone()))?;

            (id, record)
        };

        cache_table::replace(txn, id, rows)?;

        Ok(Self::permit_from_record(id, record))
    }

    fn prune_in(
        txn: &WriteTransaction,
        retention: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<PruneResult, DatabaseError> {
        let cutoff = prune_cutoff(retention, now);
        let mut result = PruneResult::default();

        let mut created = txn.open_table(SERIES_CREATED)?;
        let mut table = txn.open_table(SERIES)?;
        let series_permits = txn.open_multimap_table(SERIES_PERMITS)?;

        let mut candidates = Vec::new();
        for entry in created.iter()? {
            let (key, _) = entry?;
            let key = key.value();
            if key.timestamp >= cutoff {
                break;
            }
            candidates.push(key);
        }

        for key in candidates {
            let inactive = table
                .get(key.id)?
                .is_some_and(|g| !g.value().into_inner().active);
            if !inactive {
                continue;
            }

            let permits = series_permits.get(key.id)?.count();
            if permits > 0 {
                result.skipped.push((SeriesId::new(key.id), permits));
                continue;
            }

            table.remove(key.id)?;
            created.remove(key)?;
            result.pruned.push(SeriesId::new(key.id));
        }

        Ok(result)
    }

    fn series_from_record(id: SeriesId, record: SeriesRecord) -> PermitSeries {
        PermitSeries {
            id,
            active: record.active,
            created_at: record.created_at,
            modified_at: record.modified_at,
        }
    }

    fn permit_from_record(id: PermitId, record: PermitRecord) -> Permit {
        Permit {
            id,
            series: record.series,
            external_id: record.external_id,
            subjects: record.subjects,
            areas: record.areas,
            created_at: record.created_at,
            modified_at: record.modified_at,
            revision: record.revision,
        }
    }

    fn area_from_record(identifier: AreaIdentifier, record: AreaRecord) -> PermitArea {
        PermitArea {
            identifier,
            name: record.name,
            geometry: record.geometry,
            created_at: record.created_at,
            modified_at: record.modified_at,
        }
    }
}
