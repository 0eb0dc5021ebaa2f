//! Report service configuration.
//!
//! Values come from the environment with built-in defaults; the client may
//! override individual fields from its command line before building the
//! generator. The credential is optional here: its absence is reported when a
//! report is requested, not at start-up.

use std::env;
use std::time::Duration;

use echo_common::{EchoError, Result};

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable overriding the model name.
pub const MODEL_VAR: &str = "ECHO_MODEL";
/// Environment variable overriding the API base URL.
pub const API_BASE_VAR: &str = "ECHO_API_BASE";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "ECHO_TIMEOUT_SECS";

/// Default text-generation model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Default Gemini REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Target length of the generated narrative, in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRange {
    /// Lower bound.
    pub min: u32,
    /// Upper bound.
    pub max: u32,
}

impl WordRange {
    /// Build a range, rejecting an empty or inverted one.
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min == 0 || min > max {
            return Err(EchoError::Config(format!(
                "invalid word range {min}-{max}"
            )));
        }
        Ok(Self { min, max })
    }
}

impl Default for WordRange {
    fn default() -> Self {
        Self { min: 400, max: 600 }
    }
}

/// Settings for the text-generation client and the prompt.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// API credential; `None` when not configured.
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-1.5-flash`.
    pub model: String,
    /// REST base URL without trailing slash.
    pub api_base: String,
    /// Transport timeout for one request.
    pub timeout: Duration,
    /// Requested narrative length.
    pub words: WordRange,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            words: WordRange::default(),
        }
    }
}

impl ReportConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        config.api_key = get(API_KEY_VAR);
        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(base) = get(API_BASE_VAR) {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = raw
                .parse()
                .map_err(|e| EchoError::Config(format!("{TIMEOUT_VAR}={raw}: {e}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Whether a credential is available.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
