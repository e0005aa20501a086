pub mod error;
pub mod service;

pub use error::TranscriptionServiceError;
pub use service::{TranscriptionService, TranscriptionServiceApi};

use serde::{Deserialize, Serialize};

/// Response for POST /api/speech-to-text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub transcript: String,
}
