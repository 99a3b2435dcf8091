pub mod core;
pub mod error;
pub mod types;

pub use crate::core::error::PermitError;
pub use crate::core::query::PermitQuery;
pub use crate::core::{PermitStore, PruneOutcome};
pub use error::{ConcurrencyError, IntegrityError, ValidationError};
pub use types::registration::normalize_registration_number;
