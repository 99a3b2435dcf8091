//! Vehicle registration numbers.
//!
//! Two forms exist: [`SubjectRegistration`] is what a permit's subject list
//! carries (as submitted, bounded length), and [`RegistrationNumber`] is the
//! canonical form used for cache rows and lookups. Every comparison goes
//! through [`normalize_registration_number`] so that `"ABC 123"`, `"abc-123"`
//! and `"ABC123"` are the same vehicle.

use nutype::nutype;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a submitted registration number.
pub const MAX_REGISTRATION_LENGTH: usize = 20;

/// Canonical form: uppercase, alphanumerics only.
pub fn normalize_registration_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}

fn normalizes_to_something(raw: &str) -> bool {
    raw.chars().any(char::is_alphanumeric)
}

#[nutype(
    sanitize(trim),
    validate(
        not_empty,
        len_char_max = MAX_REGISTRATION_LENGTH,
        predicate = |s: &str| normalizes_to_something(s)
    ),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct SubjectRegistration(String);

impl SubjectRegistration {
    pub fn normalized(&self) -> RegistrationNumber {
        RegistrationNumber::normalize(self.as_str())
    }
}

/// A registration number in canonical form.
///
/// Construction always normalizes, so two values compare equal iff they refer
/// to the same vehicle. May be empty when the input had no alphanumerics;
/// such a value matches nothing in the cache.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    pub fn normalize(raw: &str) -> Self {
        Self(normalize_registration_number(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RegistrationNumber {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
