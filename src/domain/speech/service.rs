use super::audio::{self, AudioArtifact, AudioClip};
use super::error::{SpeechServiceError, SynthesisError};
use super::language::LanguageIdentifier;
use super::normalizer::Normalizer;
use super::segmenter::{SegmentMode, Segmenter, SpeechUnit};
use super::synthesizer::Synthesizer;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

pub const DEFAULT_SYNTHESIS_CONCURRENCY: usize = 4;

/// What happens to the artifact when one unit fails to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Drop the failed unit and keep the rest
    Lenient,
    /// Fail the whole artifact
    Strict,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(FailurePolicy::Lenient),
            "strict" => Ok(FailurePolicy::Strict),
            other => Err(format!("unknown synthesis failure policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub segment_mode: SegmentMode,
    pub chunk_words: usize,
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

/// Normalize -> segment -> synthesize -> concatenate
pub struct SpeechService {
    normalizer: Normalizer,
    segmenter: Segmenter,
    synthesizer: Synthesizer,
    concurrency: usize,
    failure_policy: FailurePolicy,
}

impl SpeechService {
    pub fn new(
        identifier: Arc<LanguageIdentifier>,
        tts_repo: Arc<dyn TtsRepository>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            normalizer: Normalizer::new(identifier.clone()),
            segmenter: Segmenter::new(
                identifier.clone(),
                settings.segment_mode,
                settings.chunk_words,
            ),
            synthesizer: Synthesizer::new(tts_repo, identifier),
            concurrency: settings.concurrency.max(1),
            failure_policy: settings.failure_policy,
        }
    }

    pub fn provider(&self) -> &'static str {
        self.synthesizer.provider()
    }

    /// Normalize and segment an utterance into language-tagged units
    pub fn prepare(&self, utterance: &str) -> Vec<SpeechUnit> {
        let normalized = self.normalizer.normalize(utterance);
        self.segmenter.segment(&normalized)
    }

    /// Synthesize units with a bounded window, returning clips in unit order.
    ///
    /// In-flight calls are dropped as soon as this future is dropped or a
    /// strict failure aborts the run.
    pub async fn synthesize_units(
        &self,
        units: &[SpeechUnit],
    ) -> Result<Vec<AudioClip>, SpeechServiceError> {
        let results = stream::iter(units.iter().cloned().enumerate())
            .map(|(index, unit)| async move { (index, self.synthesizer.synthesize(&unit).await) })
            .buffered(self.concurrency);
        let mut results = std::pin::pin!(results);

        let mut clips = Vec::with_capacity(units.len());
        while let Some((index, result)) = results.next().await {
            match result {
                Ok(Some(clip)) => clips.push(clip),
                Ok(None) => {}
                Err(source) => self.handle_failure(index, &units[index], source)?,
            }
        }

        Ok(clips)
    }

    fn handle_failure(
        &self,
        index: usize,
        unit: &SpeechUnit,
        source: SynthesisError,
    ) -> Result<(), SpeechServiceError> {
        match self.failure_policy {
            FailurePolicy::Strict => {
                tracing::error!(
                    unit_index = index,
                    language = %unit.language,
                    error = %source,
                    "Synthesis failed, aborting artifact"
                );
                Err(SpeechServiceError::Synthesis { index, source })
            }
            FailurePolicy::Lenient => {
                tracing::warn!(
                    unit_index = index,
                    language = %unit.language,
                    error = %source,
                    "Synthesis failed, dropping unit"
                );
                Ok(())
            }
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Render an utterance to a single audio artifact
    ///
    /// Returns `None` when nothing was synthesized (empty input, or every
    /// unit dropped under the lenient policy).
    async fn render(&self, utterance: &str) -> Result<Option<AudioArtifact>, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn render(&self, utterance: &str) -> Result<Option<AudioArtifact>, SpeechServiceError> {
        let start_time = std::time::Instant::now();

        let units = self.prepare(utterance);
        if units.is_empty() {
            tracing::debug!("No speech units, skipping synthesis");
            return Ok(None);
        }

        let clips = self.synthesize_units(&units).await?;
        let artifact = audio::concatenate(&clips)?;

        tracing::info!(
            provider = self.provider(),
            unit_count = units.len(),
            clip_count = clips.len(),
            dropped_units = units.len() - clips.len(),
            audio_size_bytes = artifact.as_ref().map(|a| a.bytes.len()).unwrap_or(0),
            duration_ms = artifact.as_ref().map(|a| a.duration.as_millis()).unwrap_or(0),
            latency_ms = start_time.elapsed().as_millis(),
            "Speech rendered"
        );

        Ok(artifact)
    }
}
