use super::tts_repository::TtsRepository;
use crate::domain::speech::{AudioEncoding, EncodedAudio, LanguageCode};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// Polly only returns 8 kHz or 16 kHz for PCM output
const PCM_SAMPLE_RATE: u32 = 16_000;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Select the appropriate neural Polly voice for a language
    fn get_voice_for_language(language: LanguageCode) -> &'static str {
        match language {
            LanguageCode::English => "Joanna",
            LanguageCode::Spanish => "Lupe",
            LanguageCode::French => "Lea",
            LanguageCode::German => "Vicki",
            LanguageCode::Italian => "Bianca",
            LanguageCode::Portuguese => "Ines",
        }
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<EncodedAudio, String> {
        let start_time = std::time::Instant::now();
        let voice_name = Self::get_voice_for_language(language);
        let voice_id = VoiceId::from(voice_name);
        let engine = Engine::Neural;

        tracing::debug!(
            language = %language,
            voice = voice_name,
            engine = ?engine,
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Pcm)
            .sample_rate(PCM_SAMPLE_RATE.to_string())
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    language = %language,
                    voice = voice_name,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let bytes = audio_stream.into_bytes().to_vec();

        tracing::info!(
            provider = "polly",
            language = %language,
            latency_ms = duration_ms(start_time),
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
        "polly"
    }
}

fn duration_ms(start_time: std::time::Instant) -> u128 {
    start_time.elapsed().as_millis()
}
