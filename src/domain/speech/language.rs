use super::error::DetectionError;
use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ISO 639-1 language codes the detector can recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 6] = [
        LanguageCode::English,
        LanguageCode::Spanish,
        LanguageCode::French,
        LanguageCode::German,
        LanguageCode::Italian,
        LanguageCode::Portuguese,
    ];

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
        }
    }

    /// Convert lingua Language to LanguageCode
    pub fn from_lingua(language: Language) -> Self {
        match language {
            Language::English => LanguageCode::English,
            Language::Spanish => LanguageCode::Spanish,
            Language::French => LanguageCode::French,
            Language::German => LanguageCode::German,
            Language::Italian => LanguageCode::Italian,
            Language::Portuguese => LanguageCode::Portuguese,
        }
    }

    pub fn to_lingua(self) -> Language {
        match self {
            LanguageCode::English => Language::English,
            LanguageCode::Spanish => Language::Spanish,
            LanguageCode::French => Language::French,
            LanguageCode::German => Language::German,
            LanguageCode::Italian => Language::Italian,
            LanguageCode::Portuguese => Language::Portuguese,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        LanguageCode::ALL
            .into_iter()
            .find(|language| language.as_str() == code)
            .ok_or_else(|| format!("unknown language code '{}'", s.trim()))
    }
}

/// Statistical language identification restricted to a supported set.
///
/// Every language compiled into lingua is considered during detection, so a
/// result can fall outside the supported set. `resolve` is the one place where
/// detection failures are turned into the default language.
pub struct LanguageIdentifier {
    detector: LanguageDetector,
    supported: Vec<LanguageCode>,
    default_language: LanguageCode,
}

impl LanguageIdentifier {
    pub fn new(supported: Vec<LanguageCode>, default_language: LanguageCode) -> Self {
        let languages: Vec<Language> = LanguageCode::ALL.iter().map(|l| l.to_lingua()).collect();
        let detector = LanguageDetectorBuilder::from_languages(&languages).build();

        Self {
            detector,
            supported,
            default_language,
        }
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default_language
    }

    pub fn supported(&self) -> &[LanguageCode] {
        &self.supported
    }

    pub fn is_supported(&self, language: LanguageCode) -> bool {
        self.supported.contains(&language)
    }

    /// Detect the language of `text` without applying any fallback
    pub fn detect(&self, text: &str) -> Result<LanguageCode, DetectionError> {
        let language = self
            .detector
            .detect_language_of(text)
            .map(LanguageCode::from_lingua)
            .ok_or(DetectionError::Inconclusive)?;

        if self.is_supported(language) {
            Ok(language)
        } else {
            Err(DetectionError::Unsupported(language))
        }
    }

    /// Detect the language of `text`, falling back to the default language
    pub fn resolve(&self, text: &str) -> LanguageCode {
        match self.detect(text) {
            Ok(language) => language,
            Err(e) => {
                tracing::debug!(
                    reason = %e,
                    fallback = %self.default_language,
                    text_preview = %preview(text),
                    "Language detection fell back to default"
                );
                self.default_language
            }
        }
    }

    /// Coerce an already-tagged language into the supported set
    pub fn coerce(&self, language: LanguageCode) -> LanguageCode {
        if self.is_supported(language) {
            language
        } else {
            self.default_language
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(60).collect()
}
