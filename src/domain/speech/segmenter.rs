use super::language::{LanguageCode, LanguageIdentifier};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+\s*").unwrap());
static SENTENCE_END_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").unwrap());
/// `?`/`!` glued to the next word; closing brackets and quotes stay attached
static GLUED_CLOSING_MARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([!?])([^\s!?.)\]}"'»”’])"#).unwrap());
static GLUED_OPENING_MARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([^\s¡¿(\[{"'«“‘])([¡¿])"#).unwrap());

pub const DEFAULT_CHUNK_WORDS: usize = 20;

/// A language-tagged piece of text that is synthesized on its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechUnit {
    pub text: String,
    pub language: LanguageCode,
}

impl SpeechUnit {
    pub fn new(text: impl Into<String>, language: LanguageCode) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// Fixed number of words per unit
    Chunk,
    /// One unit per sentence
    Sentence,
}

impl std::str::FromStr for SegmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chunk" => Ok(SegmentMode::Chunk),
            "sentence" => Ok(SegmentMode::Sentence),
            other => Err(format!("unknown segment mode '{}'", other)),
        }
    }
}

pub struct Segmenter {
    identifier: Arc<LanguageIdentifier>,
    mode: SegmentMode,
    chunk_words: usize,
}

impl Segmenter {
    pub fn new(identifier: Arc<LanguageIdentifier>, mode: SegmentMode, chunk_words: usize) -> Self {
        Self {
            identifier,
            mode,
            chunk_words: chunk_words.max(1),
        }
    }

    pub fn segment(&self, text: &str) -> Vec<SpeechUnit> {
        let pieces = match self.mode {
            SegmentMode::Chunk => split_into_chunks(text, self.chunk_words),
            SegmentMode::Sentence => split_into_sentences(text),
        };

        pieces
            .into_iter()
            .filter(|piece| is_speakable(piece))
            .map(|piece| {
                let language = self.identifier.resolve(&piece);
                SpeechUnit::new(piece, language)
            })
            .collect()
    }
}

/// Punctuation-only pieces have nothing for a voice to say
fn is_speakable(piece: &str) -> bool {
    piece.chars().any(char::is_alphanumeric)
}

/// Group whitespace-preserving word tokens into chunks of `chunk_words`
fn split_into_chunks(text: &str, chunk_words: usize) -> Vec<String> {
    let words: Vec<&str> = WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect();

    words
        .chunks(chunk_words)
        .map(|chunk| chunk.concat().trim().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Split after sentence-ending punctuation followed by whitespace
fn split_into_sentences(text: &str) -> Vec<String> {
    let padded = GLUED_CLOSING_MARK.replace_all(text, "$1 $2");
    let padded = GLUED_OPENING_MARK.replace_all(&padded, "$1 $2");

    let mut sentences = Vec::new();
    let mut last_end = 0;
    for mat in SENTENCE_END_PATTERN.find_iter(&padded) {
        sentences.push(padded[last_end..mat.end()].trim().to_string());
        last_end = mat.end();
    }
    sentences.push(padded[last_end..].trim().to_string());

    sentences.retain(|sentence| !sentence.is_empty());
    sentences
}
