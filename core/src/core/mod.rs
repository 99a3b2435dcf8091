//! Permit store: validation, cache derivation and the database, combined.

use crate::core::db::Database;
use crate::core::query::PermitQuery;
use crate::types::{
    AreaIdentifier, Config, MultiPolygon, Permit, PermitArea, PermitCacheItem, PermitDraft,
    PermitId, PermitSeries, PruneConfig, SeriesId,
};
use chrono::{DateTime, TimeDelta, Utc};
use error::PermitError;

pub(crate) mod cache_builder;
pub(crate) mod db;
pub mod query;

pub use cache_builder::build_cache_rows;
pub use db::error::DatabaseError;

pub mod error {
    use super::DatabaseError;
    use crate::error::{ConcurrencyError, IntegrityError, ValidationError};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum PermitError {
        #[error("Validation error: {0}")]
        Validation(#[from] ValidationError),

        #[error("Integrity error: {0}")]
        Integrity(#[from] IntegrityError),

        #[error("Concurrency error: {0}")]
        Concurrency(#[from] ConcurrencyError),

        #[error("Storage error: {0}")]
        Storage(DatabaseError),
    }

    impl From<DatabaseError> for PermitError {
        fn from(err: DatabaseError) -> Self {
            match err {
                DatabaseError::Validation(e) => Self::Validation(e),
                DatabaseError::Integrity(e) => Self::Integrity(e),
                DatabaseError::Concurrency(e) => Self::Concurrency(e),
                other => Self::Storage(other),
            }
        }
    }
}

pub struct PermitStore {
    db: Database,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub pruned: Vec<SeriesId>,
    /// Prunable by age but still referenced by permits: (series, permit count).
    pub skipped: Vec<(SeriesId, usize)>,
}

impl From<db::PruneResult> for PruneOutcome {
    fn from(result: db::PruneResult) -> Self {
        Self {
            pruned: result.pruned,
            skipped: result.skipped,
        }
    }
}

impl PermitStore {
    pub fn open(config: Config) -> Result<Self, PermitError> {
        let db = Database::new(config)?;
        Ok(Self { db })
    }
}

/// Series operations.
impl PermitStore {
    pub fn create_series(&self, now: DateTime<Utc>) -> Result<PermitSeries, PermitError> {
        let series = self.db.create_series(now)?;
        tracing::debug!(series = %series.id, "created permit series");
        Ok(series)
    }

    pub fn get_series(&self, id: SeriesId) -> Result<Option<PermitSeries>, PermitError> {
        Ok(self.db.get_series(id)?)
    }

    pub fn list_series(&self) -> Result<Vec<PermitSeries>, PermitError> {
        Ok(self.db.list_series()?)
    }

    pub fn latest_active_series(&self) -> Result<Option<PermitSeries>, PermitError> {
        Ok(self.db.latest_active_series()?)
    }

    /// Makes `id` the single active series.
    pub fn activate_series(&self, id: SeriesId, now: DateTime<Utc>) -> Result<(), PermitError> {
        let result = self.db.activate_series(id, now)?;
        tracing::info!(
            series = %id,
            deactivated = result.deactivated.len(),
            "activated permit series"
        );
        Ok(())
    }

    /// Inactive series older than `retention`. Listing only; nothing is deleted.
    pub fn prunable_series(
        &self,
        retention: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<Vec<SeriesId>, PermitError> {
        Ok(self.db.prunable_series(retention, now)?)
    }

    /// Deletes inactive series older than `retention`.
    ///
    /// Series still referenced by permits are left in place and reported in
    /// [`PruneOutcome::skipped`].
    pub fn prune_series(
        &self,
        retention: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<PruneOutcome, PermitError> {
        let outcome = PruneOutcome::from(self.db.prune_series(retention, now)?);
        Self::log_prune(&outcome);
        Ok(outcome)
    }

    /// Deletes a series. Fails with an integrity error while permits reference it.
    pub fn delete_series(&self, id: SeriesId) -> Result<(), PermitError> {
        self.db.delete_series(id)?;
        tracing::info!(series = %id, "deleted permit series");
        Ok(())
    }

    fn log_prune(outcome: &PruneOutcome) {
        for (series, permits) in &outcome.skipped {
            tracing::warn!(series = %series, permits, "prunable series still has permits, skipped");
        }
        tracing::info!(
            pruned = outcome.pruned.len(),
            skipped = outcome.skipped.len(),
            "pruned permit series"
        );
    }
}

/// Permit operations.
impl PermitStore {
    /// Creates or updates a permit and rebuilds its cache rows atomically.
    ///
    /// Cache rows are derived before the write transaction starts; a rejected
    /// save leaves the store untouched.
    pub fn save_permit(&self, draft: &PermitDraft, now: DateTime<Utc>) -> Result<Permit, PermitError> {
        let rows = build_cache_rows(&draft.subjects, &draft.areas);
        Ok(self.db.save_permit(draft, &rows, now)?)
    }

    /// Creates permits in one transaction. Either all are stored or none.
    pub fn bulk_create_permits(
        &self,
        drafts: Vec<PermitDraft>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Permit>, PermitError> {
        let prepared: Vec<_> = drafts
            .into_iter()
            .map(|draft| {
                let rows = build_cache_rows(&draft.subjects, &draft.areas);
                (draft, rows)
            })
            .collect();

        let created = self.db.bulk_create_permits(&prepared, now)?;
        tracing::info!(
            count = created.len(),
            cache_rows = prepared.iter().map(|(_, rows)| rows.len()).sum::<usize>(),
            "bulk-created permits"
        );
        Ok(created)
    }

    pub fn get_permit(&self, id: PermitId) -> Result<Option<Permit>, PermitError> {
        Ok(self.db.get_permit(id)?)
    }

    pub fn permits_in_series(&self, series: SeriesId) -> Result<Vec<PermitId>, PermitError> {
        Ok(self.db.permits_in_series(series)?)
    }

    /// Deletes a permit; its cache rows go with it.
    pub fn delete_permit(&self, id: PermitId) -> Result<(), PermitError> {
        Ok(self.db.delete_permit(id)?)
    }

    /// The stored cache rows of a permit.
    pub fn cache_items(&self, permit: PermitId) -> Result<Vec<PermitCacheItem>, PermitError> {
        Ok(self.db.cache_items(permit)?)
    }

    pub fn query(&self) -> PermitQuery<'_> {
        PermitQuery::new(&self.db)
    }
}

/// Area operations.
impl PermitStore {
    pub fn save_area(
        &self,
        identifier: &AreaIdentifier,
        name: &str,
        geometry: &MultiPolygon,
        now: DateTime<Utc>,
    ) -> Result<PermitArea, PermitError> {
        PermitArea::validate_parts(name, geometry)?;
        Ok(self.db.save_area(identifier, name, geometry, now)?)
    }

    pub fn get_area(&self, identifier: &AreaIdentifier) -> Result<Option<PermitArea>, PermitError> {
        Ok(self.db.get_area(identifier)?)
    }

    pub fn list_areas(&self) -> Result<Vec<PermitArea>, PermitError> {
        Ok(self.db.list_areas()?)
    }
}

/// Maintenance operations.
impl PermitStore {
    /// Runs the prune sweep if the configured interval has elapsed.
    ///
    /// Returns `None` when it was not due yet.
    pub fn maintenance(
        &self,
        config: PruneConfig,
        now: DateTime<Utc>,
    ) -> Result<Option<PruneOutcome>, PermitError> {
        if !self.db.should_run_maintenance(now, config.interval)? {
            tracing::debug!("maintenance not due yet");
            return Ok(None);
        }
        self.force_maintenance(config, now).map(Some)
    }

    /// Runs the prune sweep unconditionally and records the run.
    pub fn force_maintenance(
        &self,
        config: PruneConfig,
        now: DateTime<Utc>,
    ) -> Result<PruneOutcome, PermitError> {
        let outcome = PruneOutcome::from(self.db.maintenance(config.retention, now)?);
        Self::log_prune(&outcome);
        Ok(outcome)
    }

    pub fn should_run_maintenance(
        &self,
        now: DateTime<Utc>,
        interval: TimeDelta,
    ) -> Result<bool, PermitError> {
        Ok(self.db.should_run_maintenance(now, interval)?)
    }

    pub fn last_maintenance_at(&self) -> Result<Option<DateTime<Utc>>, PermitError> {
        Ok(self.db.last_maintenance_at()?)
    }
}
