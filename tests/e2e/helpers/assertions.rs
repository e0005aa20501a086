use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;

/// Assert the bytes are a mono 16-bit WAV file and return its sample count
pub fn assert_wav(bytes: &[u8]) -> usize {
    assert!(bytes.len() > 44, "WAV too short: {} bytes", bytes.len());
    assert_eq!(&bytes[0..4], b"RIFF", "Missing RIFF header");
    assert_eq!(&bytes[8..12], b"WAVE", "Missing WAVE marker");

    let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).expect("Invalid WAV");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1, "Expected mono audio");
    assert_eq!(spec.bits_per_sample, 16, "Expected 16-bit samples");
    reader.len() as usize
}

/// Assert the shape of a /api/learn response
pub fn assert_learn_response(body: &Value) {
    assert!(
        body.get("session_id").and_then(|v| v.as_str()).is_some(),
        "Missing session_id field"
    );
    assert!(
        body.get("response").and_then(|v| v.as_str()).is_some(),
        "Missing response field"
    );
    assert!(body.get("audio").is_some(), "audio field must always be present");
    assert!(
        body.get("turn").and_then(|v| v.as_u64()).is_some(),
        "Missing turn field"
    );
}

/// Decode the base64 audio of a /api/learn response
pub fn decode_audio(body: &Value) -> Vec<u8> {
    let encoded = body
        .get("audio")
        .and_then(|v| v.as_str())
        .expect("Expected base64 audio");
    general_purpose::STANDARD
        .decode(encoded)
        .expect("Audio is not valid base64")
}
