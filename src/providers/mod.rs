// Generative text providers
//
// The plan pipeline depends only on `TextGenerator`; the Gemini client is the
// production implementation and tests substitute their own.

use async_trait::async_trait;

use crate::errors::ProviderError;

pub mod gemini;
pub mod retry;
pub mod types;

pub use gemini::GeminiProvider;
pub use types::GenerationRequest;

/// Trait for generative text backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the first candidate's text.
    ///
    /// `Ok(None)` means the service answered successfully but the body carried
    /// no usable text (no candidates, no parts, empty text, or an unexpected shape).
    /// Transport failures, timeouts and non-success statuses are `Err`.
    async fn generate_text(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<String>, ProviderError>;

    /// Provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// Model used when the request does not name one
    fn default_model(&self) -> &str;
}
