//! Bounded, insertion-ordered list of distinct ticker symbols.
//!
//! Lives for one session only. Every mutation is synchronous and reports its
//! outcome twice: as the return value and as a [`UiEvent`] on the list's
//! notifier. A refused operation never changes the list.

use log::debug;

use crate::error::TickerRejection;
use crate::events::{Notifier, UiEvent};
use crate::tickers::{TickerSymbol, normalize};

/// Default number of symbols a list accepts.
pub const MAX_TICKERS: usize = 3;

/// Ordered set of at most `capacity` ticker symbols.
#[derive(Debug, Clone)]
pub struct TickerList {
    symbols: Vec<TickerSymbol>,
    capacity: usize,
    notifier: Notifier,
}

impl Default for TickerList {
    fn default() -> Self {
        Self::new(Notifier::silent())
    }
}

impl TickerList {
    /// Create an empty list with the default capacity.
    pub fn new(notifier: Notifier) -> Self {
        Self::with_capacity(MAX_TICKERS, notifier)
    }

    /// Create an empty list holding at most `capacity` symbols.
    pub fn with_capacity(capacity: usize, notifier: Notifier) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
            capacity,
            notifier,
        }
    }

    /// Append `symbol`.
    ///
    /// Duplicates are checked before capacity, so re-adding a present symbol
    /// to a full list reports `DuplicateTicker`.
    pub fn add(&mut self, symbol: TickerSymbol) -> Result<&[TickerSymbol], TickerRejection> {
        let verdict = if self.contains(&symbol) {
            Err(TickerRejection::DuplicateTicker(symbol.to_string()))
        } else if self.is_full() {
            Err(TickerRejection::CapacityExceeded {
                capacity: self.capacity,
            })
        } else {
            Ok(())
        };

        match verdict {
            Ok(()) => {
                debug!("Ticker list: appending {}", symbol);
                self.symbols.push(symbol.clone());
                self.notifier.emit(UiEvent::TickerAdded(symbol));
                Ok(self.symbols.as_slice())
            }
            Err(reason) => Err(self.reject(reason)),
        }
    }

    /// Validate raw input and append it.
    pub fn submit(&mut self, raw: &str) -> Result<&[TickerSymbol], TickerRejection> {
        match normalize(raw) {
            Ok(symbol) => self.add(symbol),
            Err(reason) => Err(self.reject(reason)),
        }
    }

    /// Remove `symbol` if present. Returns `true` when something was removed.
    pub fn remove(&mut self, symbol: &TickerSymbol) -> bool {
        match self.symbols.iter().position(|s| s == symbol) {
            Some(index) => {
                let removed = self.symbols.remove(index);
                self.notifier.emit(UiEvent::TickerRemoved(removed));
                true
            }
            None => {
                debug!("Ticker list: {} not present, nothing to remove", symbol);
                false
            }
        }
    }

    /// Current symbols, oldest first.
    pub fn symbols(&self) -> &[TickerSymbol] {
        &self.symbols
    }

    /// Whether `symbol` is in the list.
    pub fn contains(&self, symbol: &TickerSymbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// Number of symbols held.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// `true` when no symbol has been added.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// `true` when no more symbols fit.
    pub fn is_full(&self) -> bool {
        self.symbols.len() >= self.capacity
    }

    /// Maximum number of symbols.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots left.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.symbols.len())
    }

    fn reject(&self, reason: TickerRejection) -> TickerRejection {
        debug!("Ticker list: rejected ({})", reason.kind());
        self.notifier.emit(UiEvent::TickerRejected(reason.clone()));
        reason
    }
}
