//! Report generation for EchoTicker.
//!
//! Given a list of ticker symbols, the service generates a synthetic price series
//! per symbol, renders them into a prompt, and asks a text-generation model for a
//! narrative report. Modules:
//! - `config` — environment-driven settings for the model client and prompt.
//! - `model` — the synthetic daily series and its random walk.
//! - `prompt` — prompt assembly.
//! - `generator` — the `TextGenerator` seam and a canned implementation.
//! - `gemini` — HTTP client for Google's Gemini API.
//! - `classify` — provider error message classification.
//! - `fallback` — the template report used when the model is unavailable.
//! - `service` — the `ReportService` request state machine.
#![warn(missing_docs)]
pub mod classify;
pub mod config;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod service;

pub use config::{ReportConfig, WordRange};
pub use error::ReportError;
pub use gemini::GeminiClient;
pub use generator::{MockGenerator, OFFLINE_MESSAGE, ProviderError, TextGenerator};
pub use model::SyntheticDaySeries;
pub use service::{Report, ReportService, ReportSource, ReportState};
