//! Mapping of provider error messages onto failure kinds.
//!
//! The provider only exposes free-form text, so this is substring matching on
//! its wording. Everything that depends on that wording is kept in
//! [`classify`]; callers only see [`ProviderFailure`].

use strum_macros::Display;

use crate::error::ReportError;

/// What a failed text-generation call means for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProviderFailure {
    /// The credential was rejected.
    InvalidCredential,
    /// Usage quota exhausted.
    QuotaExceeded,
    /// Credential or resource not found.
    MissingCredential,
    /// Any other error shape.
    Unknown,
}

impl ProviderFailure {
    /// The terminal error for this failure, or `None` when it is recoverable.
    pub fn terminal_error(self) -> Option<ReportError> {
        match self {
            ProviderFailure::InvalidCredential => Some(ReportError::InvalidCredential),
            ProviderFailure::QuotaExceeded => Some(ReportError::QuotaExceeded),
            ProviderFailure::MissingCredential => Some(ReportError::MissingCredential),
            ProviderFailure::Unknown => None,
        }
    }
}

/// Classify a provider error message. Matching is case-sensitive and checked
/// in order: credential, quota, not found.
pub fn classify(message: &str) -> ProviderFailure {
    let has = |needle: &str| message.contains(needle);

    if has("API_KEY_INVALID") || has("API key") {
        ProviderFailure::InvalidCredential
    } else if has("quota") || has("QUOTA_EXCEEDED") {
        ProviderFailure::QuotaExceeded
    } else if has("not found") {
        ProviderFailure::MissingCredential
    } else {
        ProviderFailure::Unknown
    }
}
