use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TutorServiceError {
    #[error("upstream model error: {0}")]
    Upstream(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("audio unavailable: {0}")]
    Audio(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TutorServiceError> for AppError {
    fn from(err: TutorServiceError) -> Self {
        match err {
            TutorServiceError::Upstream(msg) => AppError::ExternalService(msg),
            TutorServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TutorServiceError::Audio(msg) => AppError::ExternalService(msg),
            TutorServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
