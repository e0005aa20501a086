pub mod chat_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod transcription_repository;
pub mod tts_repository;

pub use chat_repository::{ChatRepository, ChatRequest, OpenAiChatRepository};
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use transcription_repository::{OpenAiTranscriptionRepository, TranscriptionRepository};
pub use tts_repository::TtsRepository;
