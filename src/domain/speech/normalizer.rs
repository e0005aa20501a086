use super::language::{LanguageCode, LanguageIdentifier};
use super::numbers;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::sync::Arc;

/// "3/4", and slash-joined chains such as dates ("1/2/3") as one match
static FRACTION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:/\d+)+\b").unwrap());
static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());
static DECIMAL_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Nd}$").unwrap());

/// Words on each side of a number used to pick its spelling language
const CONTEXT_WORDS: usize = 4;

/// Rewrites text into a form a TTS voice reads naturally: fractions become
/// "X out of Y" and bare integers become words in the language around them.
pub struct Normalizer {
    identifier: Arc<LanguageIdentifier>,
}

impl Normalizer {
    pub fn new(identifier: Arc<LanguageIdentifier>) -> Self {
        Self { identifier }
    }

    pub fn normalize(&self, text: &str) -> String {
        if !text.chars().any(is_decimal_digit) {
            return text.to_string();
        }

        // Fractions first, so "3/4" is not read as two unrelated numbers
        let with_fractions = FRACTION_PATTERN.replace_all(text, |caps: &Captures| {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
            let language = self.spelling_language(text, whole.0, whole.1);
            let parts: Vec<String> = caps[0]
                .split('/')
                .map(|part| self.spell(part, language))
                .collect();
            match parts.as_slice() {
                [numerator, denominator] => format!(
                    "{} {} {}",
                    numerator,
                    fraction_connector(language),
                    denominator
                ),
                // Dates and version-like chains are read part by part
                _ => parts.join(" "),
            }
        });

        let with_numbers = INTEGER_PATTERN.replace_all(&with_fractions, |caps: &Captures| {
            let token = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
            let language = self.spelling_language(&with_fractions, token.0, token.1);
            self.spell(&caps[0], language)
        });

        with_numbers.into_owned()
    }

    /// Language of the words around `text[start..end]`, limited to languages we can spell
    fn spelling_language(&self, text: &str, start: usize, end: usize) -> LanguageCode {
        let context = context_window(text, start, end);
        let detected = self.identifier.resolve(&context);
        if numbers::can_spell(detected) {
            return detected;
        }

        let fallback = self.identifier.default_language();
        if numbers::can_spell(fallback) {
            fallback
        } else {
            LanguageCode::English
        }
    }

    fn spell(&self, digits: &str, language: LanguageCode) -> String {
        let Some(ascii) = to_ascii_digits(digits) else {
            return digits.to_string();
        };
        numbers::spell_digits(&ascii, language)
            .or_else(|| numbers::spell_digits(&ascii, LanguageCode::English))
            .unwrap_or_else(|| digits.to_string())
    }
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a decimal digit in any script. Each script's digits are a
/// contiguous zero-to-nine run of code points.
fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut zero = c as u32;
    while let Some(prev) = zero.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        zero -= 1;
    }
    Some((c as u32 - zero) % 10)
}

fn to_ascii_digits(digits: &str) -> Option<String> {
    digits
        .chars()
        .map(|c| digit_value(c).and_then(|d| char::from_digit(d, 10)))
        .collect()
}

fn fraction_connector(language: LanguageCode) -> &'static str {
    match language {
        LanguageCode::Spanish => "de",
        _ => "out of",
    }
}

/// Up to `CONTEXT_WORDS` words before and after the span, digits excluded
fn context_window(text: &str, start: usize, end: usize) -> String {
    let is_word = |w: &&str| w.chars().any(char::is_alphabetic);

    let mut before: Vec<&str> = text[..start]
        .split_whitespace()
        .rev()
        .filter(is_word)
        .take(CONTEXT_WORDS)
        .collect();
    before.reverse();

    let after = text[end..]
        .split_whitespace()
        .filter(is_word)
        .take(CONTEXT_WORDS);

    before.into_iter().chain(after).collect::<Vec<_>>().join(" ")
}
