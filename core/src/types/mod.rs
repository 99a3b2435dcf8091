pub(crate) mod config;
pub use config::{AppConfig, AppConfigError, Config, PruneConfig, RetentionConfig, StorageConfig};

pub(crate) mod ids;
pub use ids::{CacheItemId, PermitId, SeriesId};

pub mod registration;
pub use registration::{MAX_REGISTRATION_LENGTH, RegistrationNumber, SubjectRegistration};

pub(crate) mod area;
pub use area::{AreaIdentifier, MAX_AREA_IDENTIFIER_LENGTH, MultiPolygon, PermitArea, Polygon};

pub(crate) mod interval;
pub use interval::{AreaEntry, EntryKey, IntervalEntry, Subject};

pub(crate) mod permit;
pub use permit::{CacheRow, ExternalId, Permit, PermitCacheItem, PermitDraft, PermitSeries};

pub(crate) mod metadata;

pub(crate) mod record;

pub(crate) mod time_key;
pub use time_key::TimeKey;
