pub mod error;
pub mod prompts;
pub mod service;

pub use error::TutorServiceError;
pub use service::{trim_incomplete_sentence, LessonRequest, LessonTurn, TutorService, TutorServiceApi};

use serde::{Deserialize, Serialize};

/// Request for POST /api/learn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnRequest {
    pub prompt: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub is_new_chat: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub require_audio: bool,
}

/// Response for POST /api/learn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnResponse {
    pub session_id: String,
    pub response: String,
    /// Base64 WAV, explicitly null when no audio was produced
    pub audio: Option<String>,
    pub audio_format: Option<String>,
    pub turn: u64,
}

impl From<LessonTurn> for LearnResponse {
    fn from(turn: LessonTurn) -> Self {
        Self {
            audio: turn.audio.as_ref().map(|a| a.to_base64()),
            audio_format: turn.audio.as_ref().map(|a| a.mime_type().to_string()),
            session_id: turn.session_id,
            response: turn.response,
            turn: turn.turn,
        }
    }
}

impl From<LearnRequest> for LessonRequest {
    fn from(request: LearnRequest) -> Self {
        Self {
            session_id: request.session_id,
            prompt: request.prompt,
            context: request.context,
            is_new_chat: request.is_new_chat,
            require_audio: request.require_audio,
        }
    }
}

/// Request for POST /api/feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub context: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response for POST /api/feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}
