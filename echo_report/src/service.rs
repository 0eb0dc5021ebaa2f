//! Report orchestration.
//!
//! One call to [`ReportService::generate_report`] walks the request state machine:
//!
//! ```text
//! Idle -> Generating -> Succeeded
//!                    -> FailedWithFallback
//!                    -> Failed
//! ```
//!
//! Preconditions (a non-empty ticker list, a configured credential) are checked
//! before `Generating` and before any network attempt. Inside `Generating` the
//! service builds a fresh synthetic series per ticker, renders the prompt, and
//! calls the generator exactly once. Credential and quota failures end the
//! request with a [`ReportError`]; any other provider failure is answered with
//! the fallback report built from the same series.
//!
//! The service takes `&mut self` per request, so one instance never has two
//! requests in flight.

use chrono::{Local, NaiveDate};
use echo_common::{Notifier, TickerSymbol, UiEvent};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use strum_macros::Display;

use crate::classify::classify;
use crate::config::WordRange;
use crate::error::ReportError;
use crate::fallback::fallback_report;
use crate::generator::TextGenerator;
use crate::model::SyntheticDaySeries;
use crate::prompt::ReportPromptBuilder;

/// Where the request currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReportState {
    /// No request made yet, or the last one was refused up front.
    Idle,
    /// Waiting for the generator.
    Generating,
    /// The generator's text was returned.
    Succeeded,
    /// The generator failed and the fallback report was returned.
    FailedWithFallback,
    /// The request ended without a report.
    Failed,
}

/// Origin of a report's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReportSource {
    /// Returned verbatim by the text-generation model.
    Model,
    /// Built locally from the synthetic data.
    Fallback,
}

/// A finished report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Report text.
    pub text: String,
    /// Who produced the text.
    pub source: ReportSource,
    /// Synthetic data the report was built from.
    pub series: Vec<SyntheticDaySeries>,
}

/// Turns a ticker list into a narrative report.
pub struct ReportService<G: TextGenerator> {
    generator: G,
    prompts: ReportPromptBuilder,
    notifier: Notifier,
    rng: StdRng,
    today: Option<NaiveDate>,
    state: ReportState,
}

impl<G: TextGenerator> ReportService<G> {
    /// Create a service around `generator`, publishing events to `notifier`.
    pub fn new(generator: G, notifier: Notifier) -> Self {
        Self {
            generator,
            prompts: ReportPromptBuilder::default(),
            notifier,
            rng: StdRng::from_os_rng(),
            today: None,
            state: ReportState::Idle,
        }
    }

    /// Ask the model for a narrative of roughly `words` words.
    pub fn with_words(mut self, words: WordRange) -> Self {
        self.prompts = ReportPromptBuilder::new(words);
        self
    }

    /// Use a seeded random source, for reproducible series.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Pin the last day of every series instead of using the local date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// State after the most recent request.
    pub fn state(&self) -> ReportState {
        self.state
    }

    /// The generator this service calls.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Produce a report for `tickers`.
    pub async fn generate_report(
        &mut self,
        tickers: &[TickerSymbol],
    ) -> Result<Report, ReportError> {
        if tickers.is_empty() {
            return Err(self.refuse(ReportError::EmptyTickerList));
        }
        if !self.generator.is_configured() {
            return Err(self.refuse(ReportError::MissingCredential));
        }

        self.state = ReportState::Generating;
        self.notifier.emit(UiEvent::ReportRequested(tickers.to_vec()));

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let series = SyntheticDaySeries::generate_batch(tickers, today, &mut self.rng);
        let prompt = self.prompts.build(tickers, &series);
        info!(
            "Requesting report for {} ticker(s) from {}",
            tickers.len(),
            self.generator.provider()
        );

        match self.generator.invoke(&prompt).await {
            Ok(text) => {
                self.state = ReportState::Succeeded;
                info!("Report received ({} chars)", text.len());
                self.notifier.emit(UiEvent::ReportSucceeded(text.clone()));
                Ok(Report {
                    text,
                    source: ReportSource::Model,
                    series,
                })
            }
            Err(e) => {
                let failure = classify(e.message());
                match failure.terminal_error() {
                    Some(err) => {
                        warn!("Report generation failed ({}): {}", failure, e);
                        self.state = ReportState::Failed;
                        self.notifier.emit(UiEvent::ReportFailed(err.user_message()));
                        Err(err)
                    }
                    None => {
                        warn!("Report generation failed, using fallback report: {}", e);
                        self.state = ReportState::FailedWithFallback;
                        let text = fallback_report(&series);
                        self.notifier.emit(UiEvent::ReportSucceeded(text.clone()));
                        Ok(Report {
                            text,
                            source: ReportSource::Fallback,
                            series,
                        })
                    }
                }
            }
        }
    }

    /// Fail a request before it starts.
    fn refuse(&mut self, err: ReportError) -> ReportError {
        warn!("Report request refused: {}", err);
        self.state = ReportState::Idle;
        self.notifier.emit(UiEvent::ReportFailed(err.user_message()));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::gainers;
    use crate::generator::MockGenerator;
    use crossbeam_channel::unbounded;

    fn tickers(names: &[&str]) -> Vec<TickerSymbol> {
        names.iter().map(|n| TickerSymbol::parse(n).unwrap()).collect()
    }

    fn service(generator: MockGenerator) -> ReportService<MockGenerator> {
        ReportService::new(generator, Notifier::silent())
            .with_seed(42)
            .with_today(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
    }

    #[tokio::test]
    async fn returns_model_text_verbatim() {
        let mut svc = service(MockGenerator::replying("REPORT-OK"));

        let report = svc.generate_report(&tickers(&["AAPL", "MSFT"])).await.unwrap();

        assert_eq!(report.text, "REPORT-OK");
        assert_eq!(report.source, ReportSource::Model);
        assert_eq!(report.series.len(), 2);
        assert_eq!(svc.state(), ReportState::Succeeded);
        assert_eq!(svc.generator().calls(), 1);
    }

    #[tokio::test]
    async fn prompt_carries_requested_symbols() {
        let mut svc = service(MockGenerator::replying("ok"));
        svc.generate_report(&tickers(&["AAPL", "MSFT"])).await.unwrap();

        let prompt = svc.generator().last_prompt().unwrap();
        assert!(prompt.contains("AAPL:"));
        assert!(prompt.contains("MSFT:"));
        assert!(prompt.contains("2024-06-03"));
    }

    #[tokio::test]
    async fn empty_list_never_calls_generator() {
        let mut svc = service(MockGenerator::replying("unused"));

        let err = svc.generate_report(&[]).await.unwrap_err();

        assert_eq!(err, ReportError::EmptyTickerList);
        assert_eq!(svc.generator().calls(), 0);
        assert_eq!(svc.state(), ReportState::Idle);
    }

    #[tokio::test]
    async fn missing_credential_is_reported_before_calling() {
        let mut svc = service(MockGenerator::replying("unused").unconfigured());

        let err = svc.generate_report(&tickers(&["AAPL"])).await.unwrap_err();

        assert_eq!(err, ReportError::MissingCredential);
        assert_eq!(svc.generator().calls(), 0);
    }

    #[tokio::test]
    async fn quota_failure_is_terminal() {
        let mut svc = service(MockGenerator::failing("You exceeded your current quota"));

        let err = svc.generate_report(&tickers(&["AAPL"])).await.unwrap_err();

        assert_eq!(err, ReportError::QuotaExceeded);
        assert_eq!(err.user_message(), "API quota exceeded. Please try again later.");
        assert_eq!(svc.state(), ReportState::Failed);
        assert_eq!(svc.generator().calls(), 1);
    }

    #[tokio::test]
    async fn credential_failures_are_terminal() {
        for (message, expected) in [
            ("API_KEY_INVALID", ReportError::InvalidCredential),
            ("models/x is not found", ReportError::MissingCredential),
        ] {
            let mut svc = service(MockGenerator::failing(message));
            let err = svc.generate_report(&tickers(&["AAPL"])).await.unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[tokio::test]
    async fn unknown_failure_falls_back() {
        let mut svc = service(MockGenerator::failing("network blip"));
        let symbols = tickers(&["AAPL", "MSFT", "NVDA"]);

        let report = svc.generate_report(&symbols).await.unwrap();

        assert_eq!(report.source, ReportSource::Fallback);
        assert_eq!(svc.state(), ReportState::FailedWithFallback);
        assert!(!report.text.is_empty());
        for symbol in &symbols {
            assert!(report.text.contains(symbol.as_str()));
        }
        let summary = format!(
            "{} of {} stocks showing positive momentum",
            gainers(&report.series),
            symbols.len()
        );
        assert!(report.text.contains(&summary));
        assert_eq!(svc.generator().calls(), 1);
    }

    #[tokio::test]
    async fn offline_generator_always_falls_back() {
        let mut svc = service(MockGenerator::offline());

        let report = svc.generate_report(&tickers(&["AAPL"])).await.unwrap();

        assert_eq!(report.source, ReportSource::Fallback);
        assert_eq!(svc.state(), ReportState::FailedWithFallback);
    }

    #[tokio::test]
    async fn publishes_request_lifecycle() {
        let (tx, rx) = unbounded();
        let mut svc = ReportService::new(MockGenerator::failing("QUOTA_EXCEEDED"), Notifier::new(tx))
            .with_seed(1);
        let symbols = tickers(&["AAPL"]);

        let _ = svc.generate_report(&[]).await;
        let _ = svc.generate_report(&symbols).await;

        let events: Vec<UiEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                UiEvent::ReportFailed("Add at least one ticker first".into()),
                UiEvent::ReportRequested(symbols),
                UiEvent::ReportFailed("API quota exceeded. Please try again later.".into()),
            ]
        );
    }
}
