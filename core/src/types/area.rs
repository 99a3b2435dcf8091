//! Permit areas: the zones a permit's area entries refer to.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};

pub const MAX_AREA_IDENTIFIER_LENGTH: usize = 10;
pub const MAX_AREA_NAME_LENGTH: usize = 40;

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_AREA_IDENTIFIER_LENGTH),
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
pub struct AreaIdentifier(String);

/// One polygon in GK25FIN coordinates (EPSG:3879). Rings are closed (first == last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Vec<[f64; 2]>,
    #[serde(default)]
    pub interiors: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::Geometry("no polygons".to_string()));
        }
        for (index, polygon) in self.0.iter().enumerate() {
            check_ring(&polygon.exterior)
                .map_err(|reason| ValidationError::Geometry(format!("polygon {index}: {reason}")))?;
            for ring in &polygon.interiors {
                check_ring(ring).map_err(|reason| {
                    ValidationError::Geometry(format!("polygon {index} interior: {reason}"))
                })?;
            }
        }
        Ok(())
    }
}

fn check_ring(ring: &[[f64; 2]]) -> Result<(), String> {
    if ring.len() < 4 {
        return Err(format!("ring has {} points, at least 4 required", ring.len()));
    }
    if ring.iter().flatten().any(|c| !c.is_finite()) {
        return Err("non-finite coordinate".to_string());
    }
    if ring.first() != ring.last() {
        return Err("ring is not closed".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitArea {
    pub identifier: AreaIdentifier,
    pub name: String,
    pub geometry: MultiPolygon,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl PermitArea {
    /// Checks the caller-supplied parts of an area before it is stored.
    pub(crate) fn validate_parts(name: &str, geometry: &MultiPolygon) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::AreaName("must not be empty".to_string()));
        }
        if name.chars().count() > MAX_AREA_NAME_LENGTH {
            return Err(ValidationError::AreaName(format!(
                "longer than {MAX_AREA_NAME_LENGTH} characters"
            )));
        }
        geometry.validate()
    }
}
