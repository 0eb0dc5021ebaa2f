//! Ticker symbols, validation, and ticker-file parsing.

use std::fmt::{Display, Formatter};
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EchoError, TickerRejection};

/// Longest accepted symbol, in letters.
pub const MAX_SYMBOL_LEN: usize = 5;

/// A validated ticker symbol: 1 to 5 uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Trim and uppercase `raw`, then check it is 1 to 5 Latin letters.
    pub fn parse(raw: &str) -> Result<Self, TickerRejection> {
        normalize(raw)
    }

    /// Borrow the symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validate and normalize a raw text entry into a [`TickerSymbol`].
///
/// Whitespace is trimmed and the result uppercased. An empty entry is
/// `EmptyInput`; anything other than 1 to 5 letters `A-Z` is `InvalidFormat`.
pub fn normalize(raw: &str) -> Result<TickerSymbol, TickerRejection> {
    let candidate = raw.trim().to_uppercase();
    if candidate.is_empty() {
        return Err(TickerRejection::EmptyInput);
    }

    let well_formed = candidate.len() <= MAX_SYMBOL_LEN
        && candidate.bytes().all(|b| b.is_ascii_uppercase());
    if !well_formed {
        return Err(TickerRejection::InvalidFormat);
    }

    Ok(TickerSymbol(candidate))
}

impl Display for TickerSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TickerSymbol {
    type Err = TickerRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl TryFrom<String> for TickerSymbol {
    type Error = TickerRejection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl TryFrom<&str> for TickerSymbol {
    type Error = TickerRejection;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        normalize(value)
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.0
    }
}

impl AsRef<str> for TickerSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trait providing file parsing for tickers.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace, or new lines; blank lines
    /// are skipped. Returns an error naming the first token that is not a valid
    /// symbol.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<TickerSymbol>, EchoError>;
}

impl TickerParser for TickerSymbol {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Self>, EchoError> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result?;
            let tokens = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty());

            for token in tokens {
                match normalize(token) {
                    Ok(ticker) => tickers.push(ticker),
                    Err(e) => {
                        return Err(EchoError::ParseTickersFile(format!("{token}: {e}")));
                    }
                }
            }
        }
        Ok(tickers)
    }
}
