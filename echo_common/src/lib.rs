//!
//! Common types shared by the report service and the client.
//!
//! This crate aggregates:
//! - `error` — unified error type `EchoError` and the `TickerRejection` outcomes.
//! - `result` — handy `Result<T, EchoError>` alias.
//! - `tickers` — ticker symbol validation and ticker-file parsing.
//! - `watchlist` — the bounded `TickerList` a session builds up.
//! - `events` — UI events and the `Notifier` that publishes them.
#![warn(missing_docs)]
pub mod error;
pub mod events;
pub mod result;
pub mod tickers;
pub mod watchlist;

pub use error::{EchoError, TickerRejection};
pub use events::{Notifier, Severity, UiEvent};
pub use result::Result;
pub use tickers::TickerSymbol;
pub use watchlist::TickerList;
