pub mod request_id;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    health::{self, HealthController},
    learn::LearnController,
    speech::SpeechController,
};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Upper bound for uploaded recordings
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Build the application router with all routes and middleware
pub fn create_router(
    config: &Config,
    health_controller: Arc<HealthController>,
    learn_controller: Arc<LearnController>,
    speech_controller: Arc<SpeechController>,
) -> Router {
    let learn_routes = Router::new()
        .route("/api/learn", post(LearnController::learn))
        .route("/api/feedback", post(LearnController::feedback))
        .with_state(learn_controller);

    let speech_routes = Router::new()
        .route("/api/speak", post(SpeechController::speak))
        .route(
            "/api/speech-to-text",
            post(SpeechController::speech_to_text).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(speech_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_controller)
        .merge(learn_routes)
        .merge(speech_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(cors_layer(&config.cors_allowed_origins)),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static(X_REQUEST_ID)])
        .expose_headers([
            header::HeaderName::from_static(X_REQUEST_ID),
            header::HeaderName::from_static("x-duration-ms"),
            header::HeaderName::from_static("x-unit-count"),
        ])
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
