use super::RecordVariant;
use crate::types::area::{AreaIdentifier, MultiPolygon};
use crate::types::ids::{PermitId, SeriesId};
use crate::types::interval::{AreaEntry, Subject};
use crate::types::permit::ExternalId;
use crate::types::registration::RegistrationNumber;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl RecordVariant for SeriesRecord {
    const VERSION: u8 = 1;
    const TYPE_NAME: &'static str = "parking_permits::Series";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitRecord {
    pub series: SeriesId,
    pub external_id: Option<ExternalId>,
    pub subjects: Vec<Subject>,
    pub areas: Vec<AreaEntry>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub revision: u64,
}

impl RecordVariant for PermitRecord {
    const VERSION: u8 = 1;
    const TYPE_NAME: &'static str = "parking_permits::Permit";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheItemRecord {
    pub permit: PermitId,
    pub registration_number: RegistrationNumber,
    pub area_identifier: AreaIdentifier,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl RecordVariant for CacheItemRecord {
    const VERSION: u8 = 1;
    const TYPE_NAME: &'static str = "parking_permits::CacheItem";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    pub name: String,
    pub geometry: MultiPolygon,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl RecordVariant for AreaRecord {
    const VERSION: u8 = 1;
    const TYPE_NAME: &'static str = "parking_permits::Area";
}
