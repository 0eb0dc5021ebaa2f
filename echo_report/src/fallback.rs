//! Template report built without the text-generation model.
//!
//! Used when the provider fails in a way that is not a credential or quota
//! problem. Every label is a pure function of the synthetic series, so the same
//! data always yields the same text.

use strum_macros::Display;

use crate::model::SyntheticDaySeries;
use crate::prompt::signed;

/// Daily move above which risk is at least medium.
const MEDIUM_RISK_MOVE: f64 = 1.5;
/// Daily move above which risk is high.
const HIGH_RISK_MOVE: f64 = 3.0;
/// Three-day move above which the recommendation is BUY.
const BUY_MOVE: f64 = 3.0;

/// Direction of the three-day move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Trend {
    #[allow(missing_docs)]
    Bullish,
    #[allow(missing_docs)]
    Bearish,
    #[allow(missing_docs)]
    Neutral,
}

/// Volatility bucket from the largest daily move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RiskLevel {
    #[allow(missing_docs)]
    Low,
    #[allow(missing_docs)]
    Medium,
    #[allow(missing_docs)]
    High,
}

/// Fallback recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Recommendation {
    #[allow(missing_docs)]
    Buy,
    #[allow(missing_docs)]
    Hold,
}

/// Sign of the aggregate percentage change.
pub fn trend(series: &SyntheticDaySeries) -> Trend {
    if series.total_change_pct > 0.0 {
        Trend::Bullish
    } else if series.total_change_pct < 0.0 {
        Trend::Bearish
    } else {
        Trend::Neutral
    }
}

/// Largest absolute daily move, thresholded at 1.5% and 3.0%.
pub fn risk(series: &SyntheticDaySeries) -> RiskLevel {
    let max_move = series.max_abs_daily_change();
    if max_move > HIGH_RISK_MOVE {
        RiskLevel::High
    } else if max_move > MEDIUM_RISK_MOVE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// BUY when the absolute three-day move exceeds 3%, HOLD otherwise.
pub fn recommendation(series: &SyntheticDaySeries) -> Recommendation {
    if series.total_change_pct.abs() > BUY_MOVE {
        Recommendation::Buy
    } else {
        Recommendation::Hold
    }
}

/// Number of series whose aggregate change is positive.
pub fn gainers(series: &[SyntheticDaySeries]) -> usize {
    series.iter().filter(|s| trend(s) == Trend::Bullish).count()
}

/// Render the fallback report for `series`.
pub fn fallback_report(series: &[SyntheticDaySeries]) -> String {
    let sections: Vec<String> = series.iter().map(render_stock).collect();

    format!(
        "STOCK REPORT\n\
         \n\
         The AI analyst is unavailable right now, so this report was assembled \
         directly from the latest market snapshot.\n\
         \n\
         {stocks}\n\
         PORTFOLIO SUMMARY\n\
         {gainers} of {total} stocks showing positive momentum.\n\
         \n\
         This is not real financial advice.\n",
        stocks = sections.join("\n"),
        gainers = gainers(series),
        total = series.len(),
    )
}

fn render_stock(s: &SyntheticDaySeries) -> String {
    let moves: Vec<String> = s
        .daily_changes
        .iter()
        .map(|c| format!("{}%", signed(*c)))
        .collect();

    format!(
        "{symbol}\n\
         Trend: {trend}. Price moved from ${first:.2} to ${last:.2} over three sessions ({total}%).\n\
         Daily moves: {moves}.\n\
         Risk: {risk}. Largest single-day move was {largest:.2}%.\n\
         Recommendation: {rec}.\n",
        symbol = s.symbol,
        trend = trend(s),
        first = s.first_price(),
        last = s.last_price(),
        total = signed(s.total_change_pct),
        moves = moves.join(", "),
        risk = risk(s),
        largest = s.max_abs_daily_change(),
        rec = recommendation(s),
    )
}
