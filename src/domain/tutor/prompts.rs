//! Prompt templates and sampling settings for the tutoring conversation.

pub const LESSON_SYSTEM_PROMPT: &str = "You are a Spanish teacher. Teach me 20 basic Spanish words \
through conversation. Score my responses (1-5). Use format: Español sentence (English translation); \
Begin simple.";
pub const LESSON_MAX_TOKENS: u32 = 100;
pub const LESSON_TEMPERATURE: f32 = 0.01;

pub const FEEDBACK_SYSTEM_PROMPT: &str = "You are an AI language learning assistant tasked with \
providing feedback and evaluation for Spanish learners.";
pub const FEEDBACK_MAX_TOKENS: u32 = 150;
pub const FEEDBACK_TEMPERATURE: f32 = 0.0;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You keep notes for a Spanish teacher. Be brief and factual.";
pub const SUMMARY_MAX_TOKENS: u32 = 120;
pub const SUMMARY_TEMPERATURE: f32 = 0.0;

pub fn lesson_message(summary: Option<&str>, context: &str, prompt: &str) -> String {
    match summary {
        Some(summary) => format!(
            "Lesson summary so far: {}\n\nContext: {}\n\n{}",
            summary, context, prompt
        ),
        None => format!("Context: {}\n\n{}", context, prompt),
    }
}

pub fn feedback_message(context: &str) -> String {
    format!(
        "Here's the context of a Spanish learning conversation:\n\n{}\n\n\
         Based on this conversation, please provide:\n\
         1. Español words learned\n\
         2. Overall evaluation score (1-5) of the learner's progress\n\
         3. Very short constructive feedback and suggestions for improvement",
        context
    )
}

pub fn summary_message(context: &str, latest_reply: &str) -> String {
    format!(
        "Summarize this Spanish lesson in under 80 words: the Spanish words covered, the learner's \
         recurring mistakes and their latest score.\n\nConversation:\n{}\nassistant: {}",
        context, latest_reply
    )
}
