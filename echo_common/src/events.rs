//! UI-facing events and the notifier that publishes them.
//!
//! The front end owns the receiving end of a `crossbeam_channel`; the ticker
//! list and the report service hold a [`Notifier`] and push one [`UiEvent`]
//! per observable outcome (a ticker accepted or refused, a report requested,
//! finished, or failed).

use crossbeam_channel::Sender;
use log::debug;
use strum_macros::{Display, EnumString};

use crate::error::TickerRejection;
use crate::tickers::TickerSymbol;

/// Toast category, mirroring the notification styles of the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    #[allow(missing_docs)]
    Success,
    #[allow(missing_docs)]
    Warning,
    #[allow(missing_docs)]
    Error,
    #[allow(missing_docs)]
    Info,
}

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A symbol was appended to the list.
    TickerAdded(TickerSymbol),
    /// An entry was refused; the list is unchanged.
    TickerRejected(TickerRejection),
    /// A symbol was removed from the list.
    TickerRemoved(TickerSymbol),
    /// A report was requested for these symbols.
    ReportRequested(Vec<TickerSymbol>),
    /// A report is ready; carries the report text.
    ReportSucceeded(String),
    /// The request ended without a report; carries the user message.
    ReportFailed(String),
}

impl UiEvent {
    /// Toast category for this event.
    pub fn severity(&self) -> Severity {
        match self {
            UiEvent::TickerAdded(_) | UiEvent::ReportSucceeded(_) => Severity::Success,
            UiEvent::TickerRejected(TickerRejection::InvalidFormat) => Severity::Error,
            UiEvent::TickerRejected(_) => Severity::Warning,
            UiEvent::TickerRemoved(_) | UiEvent::ReportRequested(_) => Severity::Info,
            UiEvent::ReportFailed(_) => Severity::Error,
        }
    }

    /// Short status line for this event.
    pub fn message(&self) -> String {
        match self {
            UiEvent::TickerAdded(symbol) => format!("Added {symbol}"),
            UiEvent::TickerRejected(reason) => reason.to_string(),
            UiEvent::TickerRemoved(symbol) => format!("Removed {symbol}"),
            UiEvent::ReportRequested(_) => "Generating your AI-powered report...".to_string(),
            UiEvent::ReportSucceeded(_) => "Report generated successfully!".to_string(),
            UiEvent::ReportFailed(message) => message.clone(),
        }
    }
}

/// Publishes [`UiEvent`]s to an optional listener.
///
/// A notifier without a listener silently drops events, which is what tests
/// and headless callers want.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    tx: Option<Sender<UiEvent>>,
}

impl Notifier {
    /// Create a notifier that forwards events to `tx`.
    pub fn new(tx: Sender<UiEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Create a notifier with no listener.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Publish `event`. A disconnected listener is not an error.
    pub fn emit(&self, event: UiEvent) {
        if let Some(tx) = &self.tx {
            if let Err(e) = tx.send(event) {
                debug!("Event listener gone, dropping {:?}", e.into_inner());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn forwards_events_to_listener() {
        let (tx, rx) = unbounded();
        let notifier = Notifier::new(tx);
        let symbol = TickerSymbol::parse("AAPL").unwrap();

        notifier.emit(UiEvent::TickerAdded(symbol.clone()));

        assert_eq!(rx.try_recv(), Ok(UiEvent::TickerAdded(symbol)));
    }

    #[test]
    fn dropped_listener_is_ignored() {
        let (tx, rx) = unbounded();
        drop(rx);
        Notifier::new(tx).emit(UiEvent::ReportFailed("x".into()));
        Notifier::silent().emit(UiEvent::ReportFailed("x".into()));
    }

    #[test]
    fn severities_follow_toast_types() {
        assert_eq!(
            UiEvent::TickerRejected(TickerRejection::InvalidFormat).severity(),
            Severity::Error
        );
        assert_eq!(
            UiEvent::TickerRejected(TickerRejection::EmptyInput).severity(),
            Severity::Warning
        );
        assert_eq!(UiEvent::ReportRequested(vec![]).severity().to_string(), "info");
    }
}
