//! Metadata types for persistent store state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maintenance metadata. Missing fields default to None.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceMetadata {
    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,
}
