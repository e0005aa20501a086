use crate::e2e::helpers;

use helpers::assertions::{assert_learn_response, assert_wav, decode_audio};
use helpers::mocks::{CHAT_FAILURE_TRIGGER, MOCK_SAMPLES_PER_UNIT, TRIMMED_LESSON_REPLY};
use helpers::{TestContext, TEST_SUMMARY_INTERVAL};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_start_a_lesson_with_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/learn",
            &json!({
                "prompt": "Start the lesson",
                "context": "",
                "is_new_chat": true
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_learn_response(body);

    assert_eq!(
        body.get("response").and_then(|v| v.as_str()),
        Some(TRIMMED_LESSON_REPLY)
    );
    assert_eq!(body.get("turn").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(
        body.get("audio_format").and_then(|v| v.as_str()),
        Some("audio/wav")
    );
    assert!(uuid::Uuid::parse_str(body["session_id"].as_str().unwrap()).is_ok());

    // One unit per sentence, brackets kept with their sentence
    assert_eq!(
        ctx.tts.texts(),
        vec!["Hola (Hello).", "¿Cómo estás?", "(How are you?)"]
    );
    let samples = assert_wav(&decode_audio(body));
    assert_eq!(samples, 3 * MOCK_SAMPLES_PER_UNIT);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_count_turns_within_a_session(ctx: &TestContext) {
    for expected_turn in 1..=3u64 {
        let response = ctx
            .client
            .post(
                "/api/learn",
                &json!({
                    "prompt": "¿Qué significa gato?",
                    "context": "user: hola",
                    "is_new_chat": false,
                    "session_id": "session-turns"
                }),
            )
            .await
            .unwrap();

        response.assert_status(StatusCode::OK);
        let body = response.body.as_ref().unwrap();
        assert_eq!(body["session_id"].as_str(), Some("session-turns"));
        assert_eq!(body["turn"].as_u64(), Some(expected_turn));
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reset_the_session_on_new_chat(ctx: &TestContext) {
    let learn = |is_new_chat: bool| {
        json!({
            "prompt": "Continue",
            "context": "user: hola\nassistant: ¡Hola!",
            "is_new_chat": is_new_chat,
            "session_id": "session-reset"
        })
    };

    ctx.client.post("/api/learn", &learn(false)).await.unwrap();
    ctx.client.post("/api/learn", &learn(false)).await.unwrap();
    let response = ctx.client.post("/api/learn", &learn(true)).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["turn"].as_u64(), Some(1));

    // A new chat ignores the supplied context
    let last = ctx.chat.requests().pop().unwrap();
    assert!(!last.user_message.contains("assistant: ¡Hola!"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refresh_the_summary_on_interval(ctx: &TestContext) {
    let request = json!({
        "prompt": "Next word please",
        "context": "user: hola",
        "session_id": "session-summary"
    });

    for _ in 0..TEST_SUMMARY_INTERVAL {
        ctx.client
            .post("/api/learn", &request)
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }
    assert_eq!(ctx.chat.summary_requests(), 1);

    ctx.client
        .post("/api/learn", &request)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let last = ctx.chat.requests().pop().unwrap();
    assert!(last.user_message.starts_with("Lesson summary so far:"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_null_audio_when_synthesis_fails(ctx: &TestContext) {
    ctx.tts.fail_all();

    let response = ctx
        .client
        .post("/api/learn", &json!({ "prompt": "Start the lesson" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_learn_response(body);
    assert!(body["audio"].is_null());
    assert!(body["audio_format"].is_null());
    assert_eq!(body["response"].as_str(), Some(TRIMMED_LESSON_REPLY));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_when_required_audio_is_unavailable(ctx: &TestContext) {
    ctx.tts.fail_all();

    let response = ctx
        .client
        .post(
            "/api/learn",
            &json!({ "prompt": "Start the lesson", "require_audio": true }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("audio");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_bad_gateway_when_chat_fails(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/learn", &json!({ "prompt": CHAT_FAILURE_TRIGGER }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("model is overloaded");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_prompt(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/learn", &json!({ "prompt": "   " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Prompt cannot be empty");
    assert!(ctx.chat.requests().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_oversized_prompt(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/learn", &json!({ "prompt": "a".repeat(10_001) }))
        .await
        .unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}
