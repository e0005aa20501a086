use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// One instruction-following completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Repository for the hosted chat-completion model
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Returns the assistant's reply text, or the provider's error detail
    async fn complete(&self, request: ChatRequest) -> Result<String, String>;
}

/// OpenAI-compatible chat completions implementation
pub struct OpenAiChatRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiChatRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl ChatRepository for OpenAiChatRepository {
    async fn complete(&self, request: ChatRequest) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_prompt.as_str())
            .build()
            .map_err(|e| format!("Invalid system message: {}", e))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(request.user_message.as_str())
            .build()
            .map_err(|e| format!("Invalid user message: {}", e))?;

        let completion_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .max_tokens(request.max_tokens)
            .temperature(request.temperature)
            .messages([system.into(), user.into()])
            .build()
            .map_err(|e| format!("Invalid chat request: {}", e))?;

        let response = self
            .client
            .chat()
            .create(completion_request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    message_length = request.user_message.len(),
                    "Chat completion call failed"
                );
                format!("Chat completion error: {}", e)
            })?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "Chat completion returned no content".to_string())?;

        tracing::info!(
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            max_tokens = request.max_tokens,
            reply_length = text.len(),
            "Chat completion received"
        );

        Ok(text)
    }
}
