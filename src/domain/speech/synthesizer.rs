use super::audio::AudioClip;
use super::error::SynthesisError;
use super::language::LanguageIdentifier;
use super::segmenter::SpeechUnit;
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;

/// Turns one speech unit into one decoded clip via the TTS repository
pub struct Synthesizer {
    tts_repo: Arc<dyn TtsRepository>,
    identifier: Arc<LanguageIdentifier>,
}

impl Synthesizer {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, identifier: Arc<LanguageIdentifier>) -> Self {
        Self {
            tts_repo,
            identifier,
        }
    }

    pub fn provider(&self) -> &'static str {
        self.tts_repo.provider()
    }

    /// `Ok(None)` when the unit has nothing to say. Backend failures are returned, not absorbed.
    pub async fn synthesize(&self, unit: &SpeechUnit) -> Result<Option<AudioClip>, SynthesisError> {
        let text = unit.text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let language = self.identifier.coerce(unit.language);
        if language != unit.language {
            tracing::warn!(
                requested = %unit.language,
                coerced = %language,
                "Unsupported unit language reached the synthesizer"
            );
        }

        let encoded = self
            .tts_repo
            .synthesize(text, language)
            .await
            .map_err(|detail| SynthesisError::Backend { language, detail })?;

        let clip = AudioClip::decode(&encoded)?;
        Ok(Some(clip))
    }
}
