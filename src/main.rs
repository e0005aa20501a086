use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use habla_backend::controllers::{
    health::HealthController, learn::LearnController, speech::SpeechController,
};
use habla_backend::domain::session::SessionStore;
use habla_backend::domain::speech::SpeechService;
use habla_backend::domain::transcription::TranscriptionService;
use habla_backend::domain::tutor::TutorService;
use habla_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use habla_backend::infrastructure::http::{create_router, start_http_server};
use habla_backend::infrastructure::repositories::{
    OpenAiChatRepository, OpenAiTranscriptionRepository, OpenAiTtsRepository, PollyTtsRepository,
    TtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Habla Backend on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        environment = ?config.environment,
        tts_provider = ?config.tts_provider,
        supported_languages = ?config.supported_languages,
        default_language = %config.default_language,
        segment_mode = ?config.segment_mode,
        synthesis_concurrency = config.synthesis_concurrency,
        failure_policy = ?config.synthesis_failure_policy,
        "Pipeline configuration loaded"
    );

    // OpenAI client shared by chat, speech and transcription
    let mut openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
    if let Some(base_url) = &config.openai_base_url {
        openai_config = openai_config.with_api_base(base_url.clone());
    }
    let openai_client = Arc::new(Client::with_config(openai_config));

    let tts_repo = create_tts_repository(&config, openai_client.clone()).await;

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let chat_repo = Arc::new(OpenAiChatRepository::new(
        openai_client.clone(),
        config.chat_model.clone(),
    ));
    let transcription_repo = Arc::new(OpenAiTranscriptionRepository::new(
        openai_client,
        config.transcription_model.clone(),
    ));

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let identifier = Arc::new(config.language_identifier());
    let speech_service = Arc::new(SpeechService::new(
        identifier,
        tts_repo,
        config.pipeline_settings(),
    ));
    let sessions = Arc::new(SessionStore::new(
        config.session_capacity,
        config.summary_interval,
    ));
    let tutor_service = Arc::new(TutorService::new(
        chat_repo,
        speech_service.clone(),
        sessions,
    ));
    let transcription_service = Arc::new(TranscriptionService::new(
        transcription_repo,
        config.transcription_language.clone(),
    ));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
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

    // Start HTTP server with all routes
    let app = create_router(&config, health_controller, learn_controller, speech_controller);
    start_http_server(config, app).await?;

    Ok(())
}

async fn create_tts_repository(
    config: &Config,
    openai_client: Arc<Client<OpenAIConfig>>,
) -> Arc<dyn TtsRepository> {
    match config.tts_provider {
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollyTtsRepository::new(polly_client))
        }
        TtsProvider::OpenAi => {
            tracing::info!(model = %config.openai_tts_model, "Using OpenAI speech synthesis");
            Arc::new(OpenAiTtsRepository::new(
                openai_client,
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone().unwrap_or_default(),
            ))
        }
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "habla_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "habla_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
