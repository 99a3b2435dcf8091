mod app;
mod store;
mod retention;

pub use app::{AppConfig, AppConfigError, RetentionConfig, StorageConfig};
pub use store::Config;
pub use retention::PruneConfig;
