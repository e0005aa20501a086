use super::tts_repository::TtsRepository;
use crate::domain::speech::{AudioEncoding, EncodedAudio, LanguageCode};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI returns raw PCM at 24 kHz, 16-bit, mono
const PCM_SAMPLE_RATE: u32 = 24_000;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    /// Select the appropriate OpenAI voice for a language
    /// Based on voice characteristics that suit each language
    fn get_voice_for_language(&self, language: LanguageCode) -> String {
        match language {
            LanguageCode::English => "alloy".to_string(), // Neutral American accent
            LanguageCode::Spanish => "echo".to_string(),  // Warm, clear for Spanish
            LanguageCode::French => "nova".to_string(),
            LanguageCode::German => "onyx".to_string(),
            LanguageCode::Italian => "fable".to_string(),
            LanguageCode::Portuguese => "shimmer".to_string(),
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }
}

fn parse_voice(voice: &str) -> Voice {
    match voice.to_lowercase().as_str() {
        "alloy" => Voice::Alloy,
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => Voice::Alloy,
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<EncodedAudio, String> {
        let start_time = std::time::Instant::now();

        // Per-language voice unless one is forced by configuration
        let voice = if self.default_voice.is_empty() {
            self.get_voice_for_language(language)
        } else {
            self.default_voice.clone()
        };

        tracing::debug!(
            model = %self.model,
            voice = %voice,
            language = %language,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: parse_voice(&voice),
            response_format: Some(SpeechResponseFormat::Pcm),
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = %voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        let bytes = response.bytes.to_vec();

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = %voice,
            language = %language,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = bytes.len(),
            "TTS unit synthesized"
        );

        Ok(EncodedAudio {
            bytes,
            encoding: AudioEncoding::Pcm16 {
                sample_rate: PCM_SAMPLE_RATE,
                channels: 1,
            },
        })
    }

    fn provider(&self) -> &'static str {
        "openai"
    }
}
