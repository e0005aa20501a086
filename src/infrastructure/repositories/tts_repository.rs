use crate::domain::speech::{EncodedAudio, LanguageCode};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (AWS Polly, OpenAI, ...)
///
/// Implementations are responsible for:
/// - Provider-specific voice selection per language
/// - Reporting the encoding of the audio they return
///
/// Callers send one short speech unit per call; splitting and merging happen
/// in the speech pipeline.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a single speech unit in the given language
    ///
    /// # Errors
    /// Returns the provider's error detail if synthesis fails, the language
    /// is rejected or the provider is unavailable
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<EncodedAudio, String>;

    /// Short provider name for logs and health checks
    fn provider(&self) -> &'static str;
}
