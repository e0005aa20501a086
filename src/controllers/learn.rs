use axum::{extract::State, Json};
use std::sync::Arc;

use super::validate_text;
use crate::domain::tutor::{
    FeedbackRequest, FeedbackResponse, LearnRequest, LearnResponse, TutorServiceApi,
};
use crate::error::AppResult;

pub struct LearnController {
    tutor_service: Arc<dyn TutorServiceApi>,
}

impl LearnController {
    pub fn new(tutor_service: Arc<dyn TutorServiceApi>) -> Self {
        Self { tutor_service }
    }

    /// POST /api/learn - Run one tutoring turn
    pub async fn learn(
        State(controller): State<Arc<LearnController>>,
        Json(request): Json<LearnRequest>,
    ) -> AppResult<Json<LearnResponse>> {
        validate_text("Prompt", &request.prompt)?;

        let turn = controller.tutor_service.learn(request.into()).await?;

        tracing::info!(
            session_id = %turn.session_id,
            turn = turn.turn,
            has_audio = turn.audio.is_some(),
            "Lesson turn completed"
        );

        Ok(Json(LearnResponse::from(turn)))
    }

    /// POST /api/feedback - Evaluate the conversation so far
    pub async fn feedback(
        State(controller): State<Arc<LearnController>>,
        Json(request): Json<FeedbackRequest>,
    ) -> AppResult<Json<FeedbackResponse>> {
        validate_text("Context", &request.context)?;

        let feedback = controller
            .tutor_service
            .feedback(request.session_id, request.context)
            .await?;

        Ok(Json(FeedbackResponse { feedback }))
    }
}
