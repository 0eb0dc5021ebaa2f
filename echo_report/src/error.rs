//! Terminal failures of a report request.
//!
//! Each variant's `Display` text is the message shown to the user. Failures the
//! service can recover from (an unrecognised provider error) never appear here;
//! they are turned into a fallback report instead.
use thiserror::Error;

/// Reason a report request ended without a report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The request named no tickers.
    #[error("Add at least one ticker first")]
    EmptyTickerList,

    /// No credential is configured, or the provider could not find it.
    #[error("API key not found. Please configure your Gemini API key.")]
    MissingCredential,

    /// The provider refused the credential.
    #[error("Invalid API key. Please check your Gemini API key.")]
    InvalidCredential,

    /// The provider's usage quota is exhausted.
    #[error("API quota exceeded. Please try again later.")]
    QuotaExceeded,
}

impl ReportError {
    /// Message to show the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
