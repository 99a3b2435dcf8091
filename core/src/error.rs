//! Domain error taxonomy shared by the store layers.
//!
//! Every variant here is raised before (or instead of) a commit, so a failed
//! write never leaves partial state behind.

use crate::types::{PermitId, SeriesId};
use thiserror::Error;

/// Malformed input. Fixable by the caller correcting the request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: expected a list of objects")]
    NotAList { field: &'static str },

    #[error("{field}[{index}]: {reason}")]
    Entry {
        field: &'static str,
        index: usize,
        reason: String,
    },

    #[error("invalid registration number: {0}")]
    RegistrationNumber(String),

    #[error("invalid area identifier: {0}")]
    AreaIdentifier(String),

    #[error("invalid area name: {0}")]
    AreaName(String),

    #[error("invalid area geometry: {0}")]
    Geometry(String),

    #[error("invalid external id: {0}")]
    ExternalId(String),

    #[error("external id {external_id:?} already used in series {series}")]
    DuplicateExternalId {
        series: SeriesId,
        external_id: String,
    },

    #[error("permit {0} cannot be bulk-created: it already has an id")]
    AlreadyPersisted(PermitId),
}

/// Referential problems: missing rows or protected references.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("series {0} does not exist")]
    SeriesNotFound(SeriesId),

    #[error("permit {0} does not exist")]
    PermitNotFound(PermitId),

    #[error("series {series} is still referenced by {permits} permit(s)")]
    SeriesProtected { series: SeriesId, permits: usize },
}

/// Lost-update detection. The caller is expected to reload and retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConcurrencyError {
    #[error("permit {permit} was modified concurrently (expected revision {expected}, found {actual})")]
    StaleRevision {
        permit: PermitId,
        expected: u64,
        actual: u64,
    },
}
