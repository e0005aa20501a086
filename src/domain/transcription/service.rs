use super::error::TranscriptionServiceError;
use crate::infrastructure::repositories::TranscriptionRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct TranscriptionService {
    transcription_repo: Arc<dyn TranscriptionRepository>,
    /// Used when the caller gives no language hint
    default_language: Option<String>,
}

impl TranscriptionService {
    pub fn new(
        transcription_repo: Arc<dyn TranscriptionRepository>,
        default_language: Option<String>,
    ) -> Self {
        Self {
            transcription_repo,
            default_language,
        }
    }
}

#[async_trait]
pub trait TranscriptionServiceApi: Send + Sync {
    /// Turn an uploaded recording into text
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        language: Option<String>,
    ) -> Result<String, TranscriptionServiceError>;
}

#[async_trait]
impl TranscriptionServiceApi for TranscriptionService {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        language: Option<String>,
    ) -> Result<String, TranscriptionServiceError> {
        if audio.is_empty() {
            return Err(TranscriptionServiceError::Invalid(
                "Audio file cannot be empty".to_string(),
            ));
        }

        let language = language
            .filter(|l| !l.trim().is_empty())
            .or_else(|| self.default_language.clone());

        tracing::info!(
            file_name = %file_name,
            audio_size_bytes = audio.len(),
            language = ?language,
            "Transcribing audio"
        );

        let transcript = self
            .transcription_repo
            .transcribe(audio, file_name, language.as_deref())
            .await
            .map_err(TranscriptionServiceError::Upstream)?;

        Ok(transcript.trim().to_string())
    }
}
