//! Text-generation seam.
//!
//! The report service only needs "prompt in, text out, or a message on
//! failure". [`TextGenerator`] is that contract; [`crate::gemini::GeminiClient`]
//! implements it over HTTP and [`MockGenerator`] returns canned results.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a text-generation provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Wrap a provider message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The provider's human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A remote model that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the generated text.
    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Provider name, for logging.
    fn provider(&self) -> &str;

    /// Whether a credential is available. Checked before any call is made.
    fn is_configured(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError> {
        (**self).invoke(prompt).await
    }

    fn provider(&self) -> &str {
        (**self).provider()
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }
}

/// Failure message of the offline generator. It matches none of the
/// credential or quota patterns, so it always classifies as unknown and the
/// service answers with the fallback report.
pub const OFFLINE_MESSAGE: &str = "offline: no text-generation provider";

/// Generator returning a fixed reply or a fixed error.
///
/// Counts invocations and remembers the last prompt, so callers can check what
/// was (or was not) sent.
#[derive(Debug)]
pub struct MockGenerator {
    reply: Result<String, ProviderError>,
    configured: bool,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockGenerator {
    /// Succeed with `text` on every call.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Ok(text.into()))
    }

    /// Fail with `message` on every call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Err(ProviderError::new(message)))
    }

    /// Fail every call with [`OFFLINE_MESSAGE`], so every report is the
    /// fallback report.
    pub fn offline() -> Self {
        Self::failing(OFFLINE_MESSAGE)
    }

    /// Report that no credential is configured.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    fn with_reply(reply: Result<String, ProviderError>) -> Self {
        Self {
            reply,
            configured: true,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of `invoke` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_prompt.lock() {
            *guard = Some(prompt.to_string());
        }
        self.reply.clone()
    }

    fn provider(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_replies_and_counts() {
        let mock = MockGenerator::replying("hello");

        assert_eq!(mock.invoke("say hello").await.unwrap(), "hello");
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_prompt().as_deref(), Some("say hello"));
    }

    #[test]
    fn offline_message_is_recoverable() {
        use crate::classify::{ProviderFailure, classify};

        assert_eq!(classify(OFFLINE_MESSAGE), ProviderFailure::Unknown);
        assert_eq!(ProviderFailure::Unknown.terminal_error(), None);
    }

    #[tokio::test]
    async fn mock_failure_carries_message() {
        let mock = MockGenerator::failing("network blip").unconfigured();

        let err = mock.invoke("x").await.unwrap_err();
        assert_eq!(err.message(), "network blip");
        assert_eq!(err.to_string(), "network blip");
        assert!(!mock.is_configured());
    }
}
