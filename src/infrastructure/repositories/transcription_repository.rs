use async_openai::{
    config::OpenAIConfig,
    types::{AudioInput, CreateTranscriptionRequestArgs},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Repository for speech-to-text backends
#[async_trait]
pub trait TranscriptionRepository: Send + Sync {
    /// Transcribe encoded audio. `language` is an optional ISO 639-1 hint.
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        language: Option<&str>,
    ) -> Result<String, String>;
}

/// OpenAI transcription (Whisper) implementation
pub struct OpenAiTranscriptionRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTranscriptionRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl TranscriptionRepository for OpenAiTranscriptionRepository {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        language: Option<&str>,
    ) -> Result<String, String> {
        let start_time = std::time::Instant::now();
        let audio_size = audio.len();

        let mut builder = CreateTranscriptionRequestArgs::default();
        builder
            .file(AudioInput::from_vec_u8(file_name.to_string(), audio))
            .model(&self.model);
        if let Some(language) = language {
            builder.language(language);
        }
        let request = builder
            .build()
            .map_err(|e| format!("Invalid transcription request: {}", e))?;

        let response = self.client.audio().transcribe(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                audio_size_bytes = audio_size,
                "Transcription call failed"
            );
            format!("Transcription error: {}", e)
        })?;

        tracing::info!(
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_size,
            transcript_length = response.text.len(),
            "Transcription received"
        );

        Ok(response.text)
    }
}
