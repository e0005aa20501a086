use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("invalid audio: {0}")]
    Invalid(String),
    #[error("transcription backend error: {0}")]
    Upstream(String),
}

impl From<TranscriptionServiceError> for AppError {
    fn from(err: TranscriptionServiceError) -> Self {
        match err {
            TranscriptionServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TranscriptionServiceError::Upstream(msg) => AppError::ExternalService(msg),
        }
    }
}
