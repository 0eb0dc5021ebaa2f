//! Notification renderer.
//!
//! Drains the event channel on its own thread and prints one line per event,
//! prefixed with an icon for its severity. Report text is printed in full below
//! its notification. The thread ends once every sender is dropped.

use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use echo_common::{Severity, UiEvent};
use log::debug;

/// Icon shown in front of a notification.
pub fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Warning => "⚠",
        Severity::Error => "✕",
        Severity::Info => "ℹ",
    }
}

/// Text printed for one event.
pub fn format_event(event: &UiEvent) -> String {
    let mut out = format!("{} {}", icon(event.severity()), event.message());
    if let UiEvent::ReportSucceeded(text) = event {
        out.push_str("\n\n");
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

/// Spawn the renderer thread.
pub fn spawn(events: Receiver<UiEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        for event in events.iter() {
            debug!("event: {:?}", event);
            println!("{}", format_event(&event));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_common::{TickerRejection, TickerSymbol};

    #[test]
    fn formats_notifications() {
        let added = UiEvent::TickerAdded(TickerSymbol::parse("AAPL").unwrap());
        assert_eq!(format_event(&added), "✓ Added AAPL");

        let rejected = UiEvent::TickerRejected(TickerRejection::CapacityExceeded { capacity: 3 });
        assert_eq!(format_event(&rejected), "⚠ Maximum 3 tickers allowed");
    }

    #[test]
    fn report_text_follows_notification() {
        let done = UiEvent::ReportSucceeded("REPORT-OK\n".into());
        assert_eq!(
            format_event(&done),
            "✓ Report generated successfully!\n\nREPORT-OK\n"
        );
    }
}
