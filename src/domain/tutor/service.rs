use super::error::TutorServiceError;
use super::prompts;
use crate::domain::session::{SessionStore, SharedSession};
use crate::domain::speech::{AudioArtifact, SpeechServiceApi};
use crate::infrastructure::repositories::{ChatRepository, ChatRequest};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// One learner turn
#[derive(Debug, Clone, Default)]
pub struct LessonRequest {
    pub session_id: Option<String>,
    pub prompt: String,
    pub context: String,
    pub is_new_chat: bool,
    pub require_audio: bool,
}

/// The tutor's reply to one learner turn
#[derive(Debug, Clone)]
pub struct LessonTurn {
    pub session_id: String,
    pub response: String,
    pub audio: Option<AudioArtifact>,
    pub turn: u64,
}

pub struct TutorService {
    chat_repo: Arc<dyn ChatRepository>,
    speech_service: Arc<dyn SpeechServiceApi>,
    sessions: Arc<SessionStore>,
}

impl TutorService {
    pub fn new(
        chat_repo: Arc<dyn ChatRepository>,
        speech_service: Arc<dyn SpeechServiceApi>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            chat_repo,
            speech_service,
            sessions,
        }
    }
}

#[async_trait]
pub trait TutorServiceApi: Send + Sync {
    /// Run one tutoring turn
    ///
    /// This operation:
    /// - Asks the chat model for the next lesson step
    /// - Counts the answered turn in the learner's session (resetting it for
    ///   a new chat)
    /// - Refreshes the session summary every N turns
    /// - Renders the reply to speech; audio failures only fail the turn when
    ///   the request requires audio
    async fn learn(&self, request: LessonRequest) -> Result<LessonTurn, TutorServiceError>;

    /// Evaluate a conversation and remember the evaluation as the session summary
    async fn feedback(
        &self,
        session_id: Option<String>,
        context: String,
    ) -> Result<String, TutorServiceError>;
}

#[async_trait]
impl TutorServiceApi for TutorService {
    async fn learn(&self, request: LessonRequest) -> Result<LessonTurn, TutorServiceError> {
        let session_id = request
            .session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let session = self.sessions.context(&session_id).await;

        // A new chat starts without the previous summary
        let summary = if request.is_new_chat {
            None
        } else {
            session.lock().await.summary().map(str::to_string)
        };

        let context = if request.is_new_chat {
            ""
        } else {
            request.context.as_str()
        };

        tracing::info!(
            session_id = %session_id,
            is_new_chat = request.is_new_chat,
            has_summary = summary.is_some(),
            prompt_length = request.prompt.len(),
            "Lesson turn requested"
        );

        let reply = self
            .chat_repo
            .complete(ChatRequest {
                system_prompt: prompts::LESSON_SYSTEM_PROMPT.to_string(),
                user_message: prompts::lesson_message(summary.as_deref(), context, &request.prompt),
                max_tokens: prompts::LESSON_MAX_TOKENS,
                temperature: prompts::LESSON_TEMPERATURE,
            })
            .await
            .map_err(TutorServiceError::Upstream)?;
        let response = trim_incomplete_sentence(&reply);

        // Only answered turns count, and a failed new chat keeps the old session
        let turn = {
            let mut context = session.lock().await;
            if request.is_new_chat {
                context.reset();
            }
            context.record_turn()
        };

        if self.sessions.summary_due(turn) {
            self.refresh_summary(&session_id, &session, context, &response)
                .await;
        }

        let audio = self.render_audio(&response, request.require_audio).await?;

        Ok(LessonTurn {
            session_id,
            response,
            audio,
            turn,
        })
    }

    async fn feedback(
        &self,
        session_id: Option<String>,
        context: String,
    ) -> Result<String, TutorServiceError> {
        if context.trim().is_empty() {
            return Err(TutorServiceError::Invalid(
                "Context cannot be empty".to_string(),
            ));
        }

        let feedback = self
            .chat_repo
            .complete(ChatRequest {
                system_prompt: prompts::FEEDBACK_SYSTEM_PROMPT.to_string(),
                user_message: prompts::feedback_message(&context),
                max_tokens: prompts::FEEDBACK_MAX_TOKENS,
                temperature: prompts::FEEDBACK_TEMPERATURE,
            })
            .await
            .map_err(TutorServiceError::Upstream)?;

        if let Some(session_id) = session_id.filter(|id| !id.trim().is_empty()) {
            self.sessions
                .store_summary(&session_id, feedback.clone())
                .await;
            tracing::info!(session_id = %session_id, "Feedback stored as session summary");
        }

        Ok(feedback)
    }
}

impl TutorService {
    async fn refresh_summary(
        &self,
        session_id: &str,
        session: &SharedSession,
        context: &str,
        latest_reply: &str,
    ) {
        let result = self
            .chat_repo
            .complete(ChatRequest {
                system_prompt: prompts::SUMMARY_SYSTEM_PROMPT.to_string(),
                user_message: prompts::summary_message(context, latest_reply),
                max_tokens: prompts::SUMMARY_MAX_TOKENS,
                temperature: prompts::SUMMARY_TEMPERATURE,
            })
            .await;

        match result {
            Ok(summary) => {
                session.lock().await.store_summary(summary);
                tracing::info!(session_id = %session_id, "Session summary refreshed");
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "Session summary refresh failed, keeping previous summary"
                );
            }
        }
    }

    async fn render_audio(
        &self,
        text: &str,
        require_audio: bool,
    ) -> Result<Option<AudioArtifact>, TutorServiceError> {
        match self.speech_service.render(text).await {
            Ok(Some(artifact)) => Ok(Some(artifact)),
            Ok(None) if require_audio => Err(TutorServiceError::Audio(
                "no audio was produced for the response".to_string(),
            )),
            Ok(None) => Ok(None),
            Err(e) if require_audio => Err(TutorServiceError::Audio(e.to_string())),
            Err(e) => {
                tracing::warn!(error = %e, "Speech rendering failed, returning text only");
                Ok(None)
            }
        }
    }
}

const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', ')'];

/// Drop a trailing unfinished sentence left by the token limit.
/// Text without any finished sentence is returned as is.
pub fn trim_incomplete_sentence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(SENTENCE_TERMINATORS) {
        return trimmed.to_string();
    }

    let mut chars = trimmed.char_indices().peekable();
    let mut cut = None;
    while let Some((index, c)) = chars.next() {
        let at_boundary = chars.peek().map_or(false, |(_, next)| next.is_whitespace());
        if SENTENCE_TERMINATORS.contains(&c) && at_boundary {
            cut = Some(index + c.len_utf8());
        }
    }

    match cut {
        Some(end) => trimmed[..end].to_string(),
        None => trimmed.to_string(),
    }
}
