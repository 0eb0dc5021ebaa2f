//! Synthetic multi-day price series.
//!
//! A `SyntheticDaySeries` stands in for real market data: four daily closes for one
//! symbol produced by a small random walk, plus derived day-over-day changes, an
//! aggregate three-day change, a synthetic volume, and a market-cap label.
//!
//! The arithmetic lives in [`SyntheticDaySeries::from_draws`], which consumes six
//! uniform draws in a fixed order; [`SyntheticDaySeries::generate`] only supplies those
//! draws from a `rand::Rng`.

use chrono::{Days, Local, NaiveDate};
use echo_common::TickerSymbol;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of daily price points in a series.
pub const POINTS: usize = 4;
/// Uniform draws consumed per series: base, three steps, volume, market cap.
pub const DRAWS: usize = 6;

/// Lowest possible starting price.
const BASE_PRICE_MIN: f64 = 50.0;
/// Width of the starting price range.
const BASE_PRICE_SPAN: f64 = 200.0;
/// Largest daily move is half of this, i.e. ±1.5%.
const STEP_SPAN: f64 = 0.03;
/// Inclusive lower bound of the synthetic volume.
pub const VOLUME_MIN: u64 = 2_000_000;
/// Width of the synthetic volume range (upper bound exclusive).
const VOLUME_SPAN: f64 = 15_000_000.0;
const MARKET_CAP_MIN: f64 = 50.0;
const MARKET_CAP_SPAN: f64 = 500.0;

/// One dated close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Close, rounded to cents.
    pub price: f64,
}

/// Four days of synthetic data for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticDaySeries {
    /// Symbol this series was generated for.
    pub symbol: TickerSymbol,
    /// Closes for t-3, t-2, t-1 and t-0, oldest first.
    pub points: [PricePoint; POINTS],
    /// Percentage change of each day against the previous one.
    pub daily_changes: [f64; POINTS - 1],
    /// `t-0` close minus `t-3` close.
    pub total_change: f64,
    /// `total_change` as a percentage of the `t-3` close.
    pub total_change_pct: f64,
    /// Synthetic traded volume.
    pub volume: u64,
    /// Market capitalization label such as `"312.4B"`.
    pub market_cap: String,
}

impl SyntheticDaySeries {
    /// Generate a series ending today (local calendar).
    pub fn generate_today<R: Rng>(symbol: &TickerSymbol, rng: &mut R) -> Self {
        Self::generate(symbol, Local::now().date_naive(), rng)
    }

    /// Generate a series ending on `today`, drawing six uniforms from `rng`.
    pub fn generate<R: Rng>(symbol: &TickerSymbol, today: NaiveDate, rng: &mut R) -> Self {
        let mut draws = [0.0; DRAWS];
        for draw in draws.iter_mut() {
            *draw = rng.random::<f64>();
        }
        Self::from_draws(symbol, today, draws)
    }

    /// Build a series from six uniform draws in `[0, 1)`.
    ///
    /// Draw order: starting price, the three daily steps, volume, market cap. Each
    /// day's price is derived from the unrounded previous price; rounding to cents
    /// happens only when values are stored.
    pub fn from_draws(symbol: &TickerSymbol, today: NaiveDate, draws: [f64; DRAWS]) -> Self {
        let mut raw = [0.0; POINTS];
        raw[0] = BASE_PRICE_MIN + BASE_PRICE_SPAN * draws[0];
        for i in 1..POINTS {
            raw[i] = next_price(raw[i - 1], draws[i]);
        }

        let mut daily_changes = [0.0; POINTS - 1];
        for i in 1..POINTS {
            daily_changes[i - 1] = round2((raw[i] - raw[i - 1]) / raw[i - 1] * 100.0);
        }

        let total = raw[POINTS - 1] - raw[0];
        let volume = VOLUME_MIN + (draws[4] * VOLUME_SPAN).floor() as u64;
        let market_cap = format!("{:.1}B", MARKET_CAP_MIN + MARKET_CAP_SPAN * draws[5]);

        let points = std::array::from_fn(|i| PricePoint {
            date: today - Days::new((POINTS - 1 - i) as u64),
            price: round2(raw[i]),
        });

        SyntheticDaySeries {
            symbol: symbol.clone(),
            points,
            daily_changes,
            total_change: round2(total),
            total_change_pct: round2(total / raw[0] * 100.0),
            volume,
            market_cap,
        }
    }

    /// Generate one series per symbol, in the given order.
    pub fn generate_batch<R: Rng>(
        symbols: &[TickerSymbol],
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<Self> {
        symbols
            .iter()
            .map(|symbol| Self::generate(symbol, today, rng))
            .collect()
    }

    /// Largest absolute day-over-day percentage move.
    pub fn max_abs_daily_change(&self) -> f64 {
        self.daily_changes
            .iter()
            .fold(0.0_f64, |acc, change| acc.max(change.abs()))
    }

    /// Most recent close.
    pub fn last_price(&self) -> f64 {
        self.points[POINTS - 1].price
    }

    /// Oldest close.
    pub fn first_price(&self) -> f64 {
        self.points[0].price
    }
}

/// One step of the walk: a move of at most ±1.5% around `current_price`.
///
/// `draw` is uniform in `[0, 1)`; 0.5 means no change.
pub fn next_price(current_price: f64, draw: f64) -> f64 {
    current_price * (1.0 + (draw - 0.5) * STEP_SPAN)
}

/// Round to two decimal places. A result of zero is always `+0.0`.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn aapl() -> TickerSymbol {
        TickerSymbol::parse("AAPL").unwrap()
    }

    fn has_two_decimals(value: f64) -> bool {
        value.is_finite() && ((value * 100.0).round() / 100.0 - value).abs() < 1e-9
    }

    #[test]
    fn flat_draws_keep_price_constant() {
        let series = SyntheticDaySeries::from_draws(&aapl(), today(), [0.25, 0.5, 0.5, 0.5, 0.0, 0.0]);

        assert!(series.points.iter().all(|p| p.price == 100.0));
        assert_eq!(series.daily_changes, [0.0, 0.0, 0.0]);
        assert_eq!(series.total_change, 0.0);
        assert_eq!(series.volume, 2_000_000);
        assert_eq!(series.market_cap, "50.0B");
    }

    #[test]
    fn steps_compound_on_unrounded_prices() {
        let series = SyntheticDaySeries::from_draws(&aapl(), today(), [0.5, 1.0, 1.0, 0.0, 0.5, 0.5]);

        // 150 -> 152.25 -> 154.53375 -> 152.2157...
        let prices: Vec<f64> = series.points.iter().map(|p| p.price).collect();
        assert_eq!(prices, [150.0, 152.25, 154.53, 152.22]);
        assert_eq!(series.daily_changes, [1.5, 1.5, -1.5]);
        assert_eq!(series.total_change, 2.22);
        assert_eq!(series.total_change_pct, 1.48);
        assert_eq!(series.volume, 9_500_000);
        assert_eq!(series.market_cap, "300.0B");
    }

    #[test]
    fn tiny_moves_round_to_positive_zero() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let series = SyntheticDaySeries::from_draws(&aapl(), today, [0.5, 0.49999, 0.5, 0.5, 0.5, 0.5]);

        for change in series.daily_changes {
            assert!(change.is_sign_positive(), "{change} has a negative sign");
        }
        assert!(series.total_change.is_sign_positive());
        assert!(series.total_change_pct.is_sign_positive());
        assert!(round2(-0.001).is_sign_positive());

        let json = serde_json::to_string(&series).unwrap();
        assert!(!json.contains("-0.0"));
    }

    #[test]
    fn dates_end_today_one_day_apart() {
        let series = SyntheticDaySeries::from_draws(&aapl(), today(), [0.1; DRAWS]);
        let dates: Vec<String> = series.points.iter().map(|p| p.date.to_string()).collect();
        // 2024 is a leap year
        assert_eq!(dates, ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn random_series_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let series = SyntheticDaySeries::generate(&aapl(), today(), &mut rng);

            assert!(series.points.iter().all(|p| p.price > 0.0));
            assert!(series.daily_changes.iter().all(|c| has_two_decimals(*c)));
            assert!(has_two_decimals(series.total_change_pct));
            assert!(has_two_decimals(series.total_change));
            assert!((2_000_000..=17_000_000).contains(&series.volume));
            assert!(series.max_abs_daily_change() <= 1.5);
            for pair in series.points.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, chrono::TimeDelta::days(1));
            }
            assert_eq!(series.points[POINTS - 1].date, today());
        }
    }

    #[test]
    fn batch_follows_symbol_order() {
        let symbols: Vec<TickerSymbol> = ["MSFT", "AAPL"]
            .iter()
            .map(|s| TickerSymbol::parse(s).unwrap())
            .collect();
        let mut rng = StdRng::seed_from_u64(1);

        let batch = SyntheticDaySeries::generate_batch(&symbols, today(), &mut rng);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].symbol.as_str(), "MSFT");
        assert_eq!(batch[1].symbol.as_str(), "AAPL");
    }

    #[test]
    fn serializes_dates_as_iso_strings() {
        let series = SyntheticDaySeries::from_draws(&aapl(), today(), [0.5; DRAWS]);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["points"][3]["date"], "2024-03-01");
        assert_eq!(json["symbol"], "AAPL");
    }
}
