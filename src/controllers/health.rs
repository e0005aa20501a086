use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::speech::LanguageCode;

pub struct HealthController {
    tts_provider: &'static str,
    supported_languages: Vec<LanguageCode>,
    default_language: LanguageCode,
}

impl HealthController {
    pub fn new(
        tts_provider: &'static str,
        supported_languages: Vec<LanguageCode>,
        default_language: LanguageCode,
    ) -> Self {
        Self {
            tts_provider,
            supported_languages,
            default_language,
        }
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(controller): State<Arc<HealthController>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "tts": controller.tts_provider,
            "languages": controller.supported_languages,
            "default_language": controller.default_language,
        })),
    )
}
