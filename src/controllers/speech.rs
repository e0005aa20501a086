use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::validate_text;
use crate::domain::speech::SpeechServiceApi;
use crate::domain::transcription::{TranscriptionResponse, TranscriptionServiceApi};
use crate::error::{AppError, AppResult};

/// Request for POST /api/speak
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
}

const DEFAULT_UPLOAD_NAME: &str = "audio.wav";

pub struct SpeechController {
    speech_service: Arc<dyn SpeechServiceApi>,
    transcription_service: Arc<dyn TranscriptionServiceApi>,
}

impl SpeechController {
    pub fn new(
        speech_service: Arc<dyn SpeechServiceApi>,
        transcription_service: Arc<dyn TranscriptionServiceApi>,
    ) -> Self {
        Self {
            speech_service,
            transcription_service,
        }
    }

    /// POST /api/speak - Render text to a single WAV file
    pub async fn speak(
        State(controller): State<Arc<SpeechController>>,
        Json(request): Json<SpeakRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        validate_text("Text", &request.text)?;

        let Some(artifact) = controller.speech_service.render(&request.text).await? else {
            return Ok((StatusCode::NO_CONTENT, HeaderMap::new(), Body::empty()));
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(artifact.mime_type()),
        );
        headers.insert(
            "X-Duration-Ms",
            HeaderValue::from(artifact.duration.as_millis() as u64),
        );
        headers.insert("X-Unit-Count", HeaderValue::from(artifact.clip_count));

        Ok((StatusCode::OK, headers, Body::from(artifact.bytes)))
    }

    /// POST /api/speech-to-text - Transcribe an uploaded recording
    pub async fn speech_to_text(
        State(controller): State<Arc<SpeechController>>,
        mut multipart: Multipart,
    ) -> AppResult<Json<TranscriptionResponse>> {
        let mut audio = None;
        let mut language = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "audio" => {
                    let file_name = field
                        .file_name()
                        .unwrap_or(DEFAULT_UPLOAD_NAME)
                        .to_string();
                    let bytes = field.bytes().await?;
                    audio = Some((file_name, bytes.to_vec()));
                }
                "language" => {
                    language = Some(field.text().await?);
                }
                _ => {}
            }
        }

        let (file_name, bytes) =
            audio.ok_or_else(|| AppError::BadRequest("Missing 'audio' file field".to_string()))?;

        let transcript = controller
            .transcription_service
            .transcribe(bytes, &file_name, language)
            .await?;

        Ok(Json(TranscriptionResponse { transcript }))
    }
}
