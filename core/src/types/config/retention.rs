use super::RetentionConfig;
use chrono::TimeDelta;

/// Retention settings passed to the prune/maintenance operations.
#[derive(Clone, Copy, Debug)]
pub struct PruneConfig {
    /// Inactive series created longer ago than this are prunable.
    pub retention: TimeDelta,
    /// Minimum time between two maintenance runs.
    pub interval: TimeDelta,
}

impl From<&RetentionConfig> for PruneConfig {
    fn from(config: &RetentionConfig) -> Self {
        Self {
            retention: TimeDelta::days(i64::from(config.prune_after_days)),
            interval: TimeDelta::hours(i64::from(config.maintenance_interval_hours)),
        }
    }
}
