use habla_backend::controllers::{
    health::HealthController, learn::LearnController, speech::SpeechController,
};
use habla_backend::domain::session::SessionStore;
use habla_backend::domain::speech::{
    FailurePolicy, LanguageCode, SegmentMode, SpeechService,
};
use habla_backend::domain::transcription::TranscriptionService;
use habla_backend::domain::tutor::TutorService;
use habla_backend::infrastructure::config::{Config, Environment, LogFormat, TtsProvider};
use habla_backend::infrastructure::http::create_router;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod assertions;

use api_client::TestClient;
use mocks::{MockChatRepository, MockTranscriptionRepository, MockTtsRepository};

/// Summaries refresh every other turn in tests
pub const TEST_SUMMARY_INTERVAL: u32 = 2;

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Config,
    pub chat: Arc<MockChatRepository>,
    pub tts: Arc<MockTtsRepository>,
    pub transcription: Arc<MockTranscriptionRepository>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let config = test_config();

            let chat = Arc::new(MockChatRepository::default());
            let tts = Arc::new(MockTtsRepository::default());
            let transcription = Arc::new(MockTranscriptionRepository::default());

            let identifier = Arc::new(config.language_identifier());
            let speech_service = Arc::new(SpeechService::new(
                identifier,
                tts.clone(),
                config.pipeline_settings(),
            ));
            let sessions = Arc::new(SessionStore::new(
                config.session_capacity,
                config.summary_interval,
            ));
            let tutor_service = Arc::new(TutorService::new(
                chat.clone(),
                speech_service.clone(),
                sessions,
            ));
            let transcription_service = Arc::new(TranscriptionService::new(
                transcription.clone(),
                config.transcription_language.clone(),
            ));

            let health_controller = Arc::new(HealthController::new(
                speech_service.provider(),
                config.supported_languages.clone(),
                config.default_language,
            ));
            let learn_controller = Arc::new(LearnController::new(tutor_service));
            let speech_controller = Arc::new(SpeechController::new(
                speech_service,
                transcription_service,
            ));

            let app = create_router(&config, health_controller, learn_controller, speech_controller);

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                config,
                chat,
                tts,
                transcription,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        openai_api_key: "test-openai-key".to_string(),
        openai_base_url: None,
        chat_model: "gpt-4o-mini".to_string(),
        tts_provider: TtsProvider::Polly,
        aws_region: "us-east-1".to_string(),
        openai_tts_model: "tts-1".to_string(),
        openai_tts_voice: None,
        transcription_model: "whisper-1".to_string(),
        transcription_language: None,
        supported_languages: vec![LanguageCode::English, LanguageCode::Spanish],
        default_language: LanguageCode::English,
        segment_mode: SegmentMode::Sentence,
        chunk_words: 20,
        synthesis_concurrency: 4,
        synthesis_failure_policy: FailurePolicy::Lenient,
        summary_interval: TEST_SUMMARY_INTERVAL,
        session_capacity: 100,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
    }
}
