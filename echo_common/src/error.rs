//! Error types shared across the workspace.
//!
//! `EchoError` unifies the ambient failure cases (I/O, serialization, channel
//! communication, ticker files) so crates can propagate a single error type.
//! `TickerRejection` is the validation outcome for user-entered symbols; it is
//! returned to the caller, never raised past the ticker list.
use std::io;

use crossbeam_channel::SendError;
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Unified error type shared by the report service and the client.
#[derive(Error, Debug)]
pub enum EchoError {
    /// I/O error originating from the standard library (files, stdin).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing a ticker file into `TickerSymbol` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Event channel send failed (the receiver was dropped).
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Missing or malformed configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl<T> From<SendError<T>> for EchoError {
    fn from(err: SendError<T>) -> Self {
        EchoError::ChannelSend(err.to_string())
    }
}

/// Reason a ticker entry was refused.
///
/// The `Display` text is the message shown to the user; `kind()` gives the
/// stable, machine-readable name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickerRejection {
    /// Nothing left after trimming.
    #[error("Please enter a ticker symbol")]
    EmptyInput,

    /// Not 1 to 5 Latin letters.
    #[error("Ticker must be 1-5 letters only")]
    InvalidFormat,

    /// The symbol is already in the list.
    #[error("\"{0}\" is already added")]
    DuplicateTicker(String),

    /// The list is at capacity.
    #[error("Maximum {capacity} tickers allowed")]
    CapacityExceeded {
        /// Capacity of the list that refused the entry.
        capacity: usize,
    },
}

/// Machine-readable kind of a [`TickerRejection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RejectionKind {
    #[allow(missing_docs)]
    EmptyInput,
    #[allow(missing_docs)]
    InvalidFormat,
    #[allow(missing_docs)]
    DuplicateTicker,
    #[allow(missing_docs)]
    CapacityExceeded,
}

impl TickerRejection {
    /// Kind of rejection, without its payload.
    pub fn kind(&self) -> RejectionKind {
        match self {
            TickerRejection::EmptyInput => RejectionKind::EmptyInput,
            TickerRejection::InvalidFormat => RejectionKind::InvalidFormat,
            TickerRejection::DuplicateTicker(_) => RejectionKind::DuplicateTicker,
            TickerRejection::CapacityExceeded { .. } => RejectionKind::CapacityExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_match_ui_wording() {
        assert_eq!(
            TickerRejection::DuplicateTicker("AAPL".into()).to_string(),
            "\"AAPL\" is already added"
        );
        assert_eq!(
            TickerRejection::CapacityExceeded { capacity: 3 }.to_string(),
            "Maximum 3 tickers allowed"
        );
    }

    #[test]
    fn rejection_kind_round_trips_through_strum() {
        let kind = TickerRejection::InvalidFormat.kind();
        assert_eq!(kind.to_string(), "invalid_format");
        assert_eq!("invalid_format".parse::<RejectionKind>(), Ok(kind));
    }
}
