//! Read-side permit lookups.
//!
//! Every criterion is answered from the cache indexes, never by walking
//! subject/area lists, so cost follows the number of matching cache rows.

use crate::core::db::{Database, Filter};
use crate::core::error::PermitError;
use crate::types::{Permit, PermitId, RegistrationNumber};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// A composable permit query.
///
/// Criteria are combined with AND at permit level: a permit matches when each
/// criterion is met by at least one of its cache rows. Results contain each
/// permit once. With no criteria, every permit matches.
#[derive(Clone)]
pub struct PermitQuery<'a> {
    db: &'a Database,
    filters: Vec<Filter>,
}

impl<'a> PermitQuery<'a> {
    pub(crate) fn new(db: &'a Database) -> Self {
        Self {
            db,
            filters: Vec::new(),
        }
    }

    /// Only permits of the active series.
    pub fn active(mut self) -> Self {
        self.filters.push(Filter::Active);
        self
    }

    /// Permits valid at `timestamp` (interval bounds inclusive).
    pub fn by_time(mut self, timestamp: DateTime<Utc>) -> Self {
        self.filters.push(Filter::Time(timestamp));
        self
    }

    /// Permits covering the vehicle. The input is normalized first.
    pub fn by_subject(mut self, registration_number: &str) -> Self {
        self.filters.push(Filter::Registration(RegistrationNumber::normalize(
            registration_number,
        )));
        self
    }

    /// Permits covering the area.
    pub fn by_area(mut self, area_identifier: &str) -> Self {
        self.filters
            .push(Filter::Area(area_identifier.trim().to_string()));
        self
    }

    /// Matching permits ordered by (series, id).
    pub fn run(&self) -> Result<Vec<Permit>, PermitError> {
        Ok(self.db.query_permits(&self.filters)?)
    }

    pub fn ids(&self) -> Result<BTreeSet<PermitId>, PermitError> {
        Ok(self.db.query_permit_ids(&self.filters)?)
    }

    pub fn exists(&self) -> Result<bool, PermitError> {
        Ok(!self.ids()?.is_empty())
    }
}
