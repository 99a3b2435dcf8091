use crate::error::ValidationError;
use crate::types::area::AreaIdentifier;
use crate::types::ids::{CacheItemId, PermitId, SeriesId};
use crate::types::interval::{AreaEntry, Subject};
use crate::types::registration::RegistrationNumber;
use chrono::{DateTime, Utc};
use nutype::nutype;
use serde_json::{Value, json};

pub const MAX_EXTERNAL_ID_LENGTH: usize = 50;

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_EXTERNAL_ID_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct ExternalId(String);

impl ExternalId {
    /// Parses an optional external id. Blank input means "no external id".
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Self::try_new(raw.to_string())
                .map(Some)
                .map_err(|e| ValidationError::ExternalId(e.to_string())),
        }
    }
}

/// A generation of permits. At most one series is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitSeries {
    pub id: SeriesId,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// A stored permit.
#[derive(Debug, Clone, PartialEq)]
pub struct Permit {
    pub id: PermitId,
    pub series: SeriesId,
    pub external_id: Option<ExternalId>,
    pub subjects: Vec<Subject>,
    pub areas: Vec<AreaEntry>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Starts at 1, bumped by every save.
    pub revision: u64,
}

impl Permit {
    /// A draft that updates this permit, guarded by its current revision.
    pub fn to_draft(&self) -> PermitDraft {
        PermitDraft {
            id: Some(self.id),
            expected_revision: Some(self.revision),
            series: self.series,
            external_id: self.external_id.clone(),
            subjects: self.subjects.clone(),
            areas: self.areas.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id.into_inner(),
            "series": self.series.into_inner(),
            "external_id": self.external_id.as_ref().map(|e| e.as_str()),
            "subjects": Subject::to_json(&self.subjects),
            "areas": AreaEntry::to_json(&self.areas),
            "created_at": self.created_at.to_rfc3339(),
            "modified_at": self.modified_at.to_rfc3339(),
            "revision": self.revision,
        })
    }
}

/// Write input for creating (`id == None`) or updating a permit.
#[derive(Debug, Clone, PartialEq)]
pub struct PermitDraft {
    pub id: Option<PermitId>,
    /// When set on an update, the save fails unless the stored revision matches.
    pub expected_revision: Option<u64>,
    pub series: SeriesId,
    pub external_id: Option<ExternalId>,
    pub subjects: Vec<Subject>,
    pub areas: Vec<AreaEntry>,
}

impl PermitDraft {
    pub fn new(series: SeriesId) -> Self {
        Self {
            id: None,
            expected_revision: None,
            series,
            external_id: None,
            subjects: Vec::new(),
            areas: Vec::new(),
        }
    }

    /// Builds a draft from the JSON list representation, validating both lists.
    pub fn from_json(
        series: SeriesId,
        external_id: Option<&str>,
        subjects: &Value,
        areas: &Value,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            expected_revision: None,
            series,
            external_id: ExternalId::parse_optional(external_id)?,
            subjects: Subject::parse_list(subjects)?,
            areas: AreaEntry::parse_list(areas)?,
        })
    }

    pub fn with_external_id(mut self, external_id: ExternalId) -> Self {
        self.external_id = Some(external_id);
        self
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    pub fn with_area(mut self, area: AreaEntry) -> Self {
        self.areas.push(area);
        self
    }
}

/// A derived validity row before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheRow {
    pub registration_number: RegistrationNumber,
    pub area_identifier: AreaIdentifier,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// One stored interval during which a vehicle may park in an area under a permit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitCacheItem {
    pub id: CacheItemId,
    pub permit: PermitId,
    pub registration_number: RegistrationNumber,
    pub area_identifier: AreaIdentifier,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl PermitCacheItem {
    pub fn row(&self) -> CacheRow {
        CacheRow {
            registration_number: self.registration_number.clone(),
            area_identifier: self.area_identifier.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}
