use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_pipeline_readiness(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("tts").and_then(|v| v.as_str()), Some("mock"));
    assert_eq!(
        body.get("languages"),
        Some(&serde_json::json!(["en", "es"]))
    );
    assert_eq!(
        body.get("default_language").and_then(|v| v.as_str()),
        Some("en")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_propagate_caller_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("x-request-id", "client-trace-42")])
        .await
        .unwrap();

    response.assert_header("x-request-id", "client-trace-42");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_allow_configured_cors_origin(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/health", &[("origin", "http://localhost:3000")])
        .await
        .unwrap();

    response.assert_header("access-control-allow-origin", "http://localhost:3000");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_be_fast_health_check(ctx: &TestContext) {
    let start = std::time::Instant::now();
    let response = ctx.client.get("/health").await.unwrap();
    let duration = start.elapsed();

    response.assert_status(StatusCode::OK);
    assert!(
        duration.as_millis() < 1000,
        "Health check took too long: {:?}",
        duration
    );
}
