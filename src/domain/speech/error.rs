use super::language::LanguageCode;
use crate::error::AppError;

/// Why a language could not be attributed to a piece of text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("language detection inconclusive")]
    Inconclusive,
    #[error("detected language '{0}' is not supported")]
    Unsupported(LanguageCode),
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("invalid wav data: {0}")]
    Wav(#[from] hound::Error),
    #[error("invalid pcm data: {0}")]
    Pcm(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("tts backend failed for '{language}': {detail}")]
    Backend {
        language: LanguageCode,
        detail: String,
    },
    #[error("tts backend returned undecodable audio: {0}")]
    Decode(#[from] AudioError),
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("synthesis failed for unit {index}: {source}")]
    Synthesis {
        index: usize,
        #[source]
        source: SynthesisError,
    },
    #[error("audio concatenation failed: {0}")]
    Audio(#[from] AudioError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Synthesis { .. } => AppError::ExternalService(err.to_string()),
            SpeechServiceError::Audio(e) => AppError::Internal(e.to_string()),
            SpeechServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
