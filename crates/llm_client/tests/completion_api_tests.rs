use llm_client::{CompletionBackend, LlmError, OpenAiClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

#[tokio::test]
async fn completes_a_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4",
            "temperature": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "  pragma solidity ^0.8.0;\ncontract CustomMortgageLoan {}  ",
        )))
        .mount(&server)
        .await;

    let client = OpenAiClient::new("sk-test").with_base_url(format!("{}/v1", server.uri()));
    let completion = client.complete("rewrite the contract").await.unwrap();

    // Content comes back trimmed.
    assert_eq!(
        completion,
        "pragma solidity ^0.8.0;\ncontract CustomMortgageLoan {}"
    );
}

#[tokio::test]
async fn surfaces_api_errors_with_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"error":{"message":"Invalid API key"}}"#),
        )
        .mount(&server)
        .await;

    let client = OpenAiClient::new("bad-key").with_base_url(format!("{}/v1", server.uri()));
    let err = client.complete("prompt").await.unwrap_err();

    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-456",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4",
            "choices": []
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new("sk-test").with_base_url(format!("{}/v1", server.uri()));
    let err = client.complete("prompt").await.unwrap_err();

    assert!(matches!(err, LlmError::EmptyCompletion));
}

#[tokio::test]
async fn whitespace_only_content_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("   \n  ")))
        .mount(&server)
        .await;

    let client = OpenAiClient::new("sk-test").with_base_url(format!("{}/v1", server.uri()));
    let err = client.complete("prompt").await.unwrap_err();

    assert!(matches!(err, LlmError::EmptyCompletion));
}
