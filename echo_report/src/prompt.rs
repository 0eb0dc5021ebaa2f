//! Prompt assembly for the narrative report.
//!
//! The prompt embeds every data field of each series (dated closes, signed daily
//! changes, aggregate change, volume, market cap) and then a fixed checklist of
//! report sections. The instructional wording is free; the data block and the
//! section checklist are what the report quality depends on.

use echo_common::TickerSymbol;

use crate::config::WordRange;
use crate::model::SyntheticDaySeries;
use crate::model::series::round2;

/// Sections the model is asked to cover for each stock.
pub const STOCK_SECTIONS: [&str; 6] = [
    "Trend analysis",
    "Momentum",
    "Technical observations",
    "Recommendation (buy, hold, or sell)",
    "Risk assessment",
    "Short-term outlook",
];

/// Builds the instruction text sent to the text-generation model.
#[derive(Debug, Clone, Default)]
pub struct ReportPromptBuilder {
    words: WordRange,
}

impl ReportPromptBuilder {
    /// Create a builder targeting `words` words.
    pub fn new(words: WordRange) -> Self {
        Self { words }
    }

    /// Assemble the prompt for `tickers` from their synthetic `series`.
    pub fn build(&self, tickers: &[TickerSymbol], series: &[SyntheticDaySeries]) -> String {
        let symbols: Vec<&str> = tickers.iter().map(TickerSymbol::as_str).collect();
        let data: Vec<String> = series.iter().map(render_series).collect();
        let sections: Vec<String> = STOCK_SECTIONS
            .iter()
            .map(|section| format!("   - {section}"))
            .collect();

        format!(
            "You are an experienced equity analyst. Write a detailed stock report for: {symbols}.\n\
             \n\
             Market data for the last four trading days:\n\
             \n\
             {data}\n\
             Structure the report as follows:\n\
             1. Executive summary of the whole selection.\n\
             2. For each stock, in the order listed above:\n\
             {sections}\n\
             3. Portfolio insights across all stocks.\n\
             4. Final thoughts.\n\
             \n\
             Write in plain prose. Do not use markdown, asterisks, hash signs, bullet symbols, \
             or any other markup. Aim for {min} to {max} words. Refer to the figures above where relevant.\n",
            symbols = symbols.join(", "),
            data = data.join("\n"),
            sections = sections.join("\n"),
            min = self.words.min,
            max = self.words.max,
        )
    }
}

fn render_series(s: &SyntheticDaySeries) -> String {
    let mut out = format!("{}:\n", s.symbol);
    for (i, point) in s.points.iter().enumerate() {
        out.push_str(&format!("  {} close ${:.2}", point.date, point.price));
        if i > 0 {
            out.push_str(&format!(" ({}%)", signed(s.daily_changes[i - 1])));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "  3-day change: {} ({}%)\n",
        signed(s.total_change),
        signed(s.total_change_pct)
    ));
    out.push_str(&format!("  Volume: {}\n", group_thousands(s.volume)));
    out.push_str(&format!("  Market cap: ${}\n", s.market_cap));
    out
}

/// Format with two decimals and an explicit `+` for non-negative values.
/// Anything that rounds to zero prints as `+0.00`.
pub fn signed(value: f64) -> String {
    let value = round2(value);
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

/// Insert `,` every three digits: `12345678` becomes `12,345,678`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
