use crate::domain::speech::{
    FailurePolicy, LanguageCode, LanguageIdentifier, PipelineSettings, SegmentMode,
};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // OpenAI
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub chat_model: String,
    // Speech synthesis
    pub tts_provider: TtsProvider,
    pub aws_region: String,
    pub openai_tts_model: String,
    pub openai_tts_voice: Option<String>,
    // Speech recognition
    pub transcription_model: String,
    pub transcription_language: Option<String>,
    // Pipeline
    pub supported_languages: Vec<LanguageCode>,
    pub default_language: LanguageCode,
    pub segment_mode: SegmentMode,
    pub chunk_words: usize,
    pub synthesis_concurrency: usize,
    pub synthesis_failure_policy: FailurePolicy,
    // Sessions
    pub summary_interval: u32,
    pub session_capacity: u64,
    // HTTP
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Polly,
    OpenAi,
}

impl FromStr for TtsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polly" => Ok(TtsProvider::Polly),
            "openai" => Ok(TtsProvider::OpenAi),
            other => Err(format!("unknown TTS provider '{}'", other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {detail}")]
    Invalid { name: &'static str, detail: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let supported_languages = parse_languages(&var_or("SUPPORTED_LANGUAGES", "en,es"))
            .map_err(|detail| ConfigError::Invalid {
                name: "SUPPORTED_LANGUAGES",
                detail,
            })?;
        let default_language: LanguageCode = parse_var("DEFAULT_LANGUAGE", "en")?;
        if !supported_languages.contains(&default_language) {
            return Err(ConfigError::Invalid {
                name: "DEFAULT_LANGUAGE",
                detail: format!(
                    "'{}' is not one of the supported languages",
                    default_language
                ),
            });
        }

        let config = Config {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "8080")?,
            environment: match var_or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|_| ConfigError::Missing("OPENAI_API_KEY"))?,
            openai_base_url: optional_var("OPENAI_BASE_URL"),
            chat_model: var_or("CHAT_MODEL", "gpt-4o-mini"),
            tts_provider: parse_var("TTS_PROVIDER", "polly")?,
            aws_region: var_or("AWS_REGION", "eu-west-1"),
            openai_tts_model: var_or("OPENAI_TTS_MODEL", "tts-1"),
            openai_tts_voice: optional_var("OPENAI_TTS_VOICE"),
            transcription_model: var_or("TRANSCRIPTION_MODEL", "whisper-1"),
            transcription_language: optional_var("TRANSCRIPTION_LANGUAGE"),
            supported_languages,
            default_language,
            segment_mode: parse_var("SEGMENT_MODE", "chunk")?,
            chunk_words: parse_positive("CHUNK_WORDS", "20")?,
            synthesis_concurrency: parse_positive("SYNTHESIS_CONCURRENCY", "4")?,
            synthesis_failure_policy: parse_var("SYNTHESIS_FAILURE_POLICY", "lenient")?,
            summary_interval: parse_positive::<u32>("SUMMARY_INTERVAL", "10")?,
            session_capacity: parse_positive::<u64>("SESSION_CAPACITY", "1000")?,
            cors_allowed_origins: parse_list(&var_or(
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:3000",
            )),
        };

        Ok(config)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            segment_mode: self.segment_mode,
            chunk_words: self.chunk_words,
            concurrency: self.synthesis_concurrency,
            failure_policy: self.synthesis_failure_policy,
        }
    }

    pub fn language_identifier(&self) -> LanguageIdentifier {
        LanguageIdentifier::new(self.supported_languages.clone(), self.default_language)
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var_or(name, default)
        .parse::<T>()
        .map_err(|e| ConfigError::Invalid {
            name,
            detail: e.to_string(),
        })
}

fn parse_positive<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let value: T = parse_var(name, default)?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            name,
            detail: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a comma-separated list of language codes, ignoring duplicates
pub fn parse_languages(raw: &str) -> Result<Vec<LanguageCode>, String> {
    let mut languages = Vec::new();
    for code in parse_list(raw) {
        let language = code.parse::<LanguageCode>()?;
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    if languages.is_empty() {
        return Err("at least one language is required".to_string());
    }
    Ok(languages)
}
