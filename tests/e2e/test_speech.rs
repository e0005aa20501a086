use crate::e2e::helpers;

use helpers::api_client::FormPart;
use helpers::assertions::assert_wav;
use helpers::mocks::{CORRUPT_AUDIO, MOCK_SAMPLES_PER_UNIT};
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_text_as_wav(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/speak",
            &json!({ "text": "Good morning. Buenos días, ¿cómo estás?" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav");

    let units = ctx.tts.texts().len();
    assert_eq!(units, 2);
    response.assert_header("x-unit-count", "2");
    response.assert_header("x-duration-ms", "200");
    assert_eq!(
        assert_wav(&response.body_bytes),
        units * MOCK_SAMPLES_PER_UNIT
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_numbers_as_words(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/speak", &json!({ "text": "Hello 5/10 test." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("x-unit-count", "1");

    let texts = ctx.tts.texts();
    assert_eq!(texts.len(), 1);
    assert!(
        texts[0].contains("five out of ten"),
        "unexpected unit text: {}",
        texts[0]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_no_content_when_nothing_is_synthesized(ctx: &TestContext) {
    ctx.tts.fail_all();

    let response = ctx
        .client
        .post("/api/speak", &json!({ "text": "Nothing will come out." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.body_bytes.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/speak", &json!({ "text": "" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text cannot be empty");
    assert!(ctx.tts.texts().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_transcribe_uploaded_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/speech-to-text",
            &[
                FormPart::file("audio", "answer.webm", b"fake-webm-bytes"),
                FormPart::text("language", "es"),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["transcript"].as_str(),
        Some("hola, me llamo Ana")
    );
    assert_eq!(
        ctx.transcription.calls(),
        vec![("answer.webm".to_string(), Some("es".to_string()))]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_an_audio_field(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/speech-to-text", &[FormPart::text("language", "es")])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Missing 'audio' file field");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/speech-to-text",
            &[FormPart::file("audio", "empty.wav", b"")],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(ctx.transcription.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_bad_gateway_when_transcription_fails(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/speech-to-text",
            &[FormPart::file("audio", "broken.wav", CORRUPT_AUDIO)],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("Invalid file format");
}
