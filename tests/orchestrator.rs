#![allow(clippy::unwrap_used)]
//! Request/retry behavior against a mock HTTP server.
//!
//! Each mock carries an `expect` count that wiremock verifies when the server
//! is dropped, so a missing or extra attempt fails the test.

use ideate_cli::ideation::{
    Accumulator, ErrorBody, IdeationClient, IdeationError, Provider, ProviderKind, list_models,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const HELLO_NDJSON: &str = concat!(
    r#"{"message":{"role":"assistant","content":"Hel"},"done":false}"#,
    "\n",
    r#"{"message":{"role":"assistant","content":"lo"},"done":false}"#,
    "\n",
    r#"{"message":{"role":"assistant","content":""},"done":true}"#,
    "\n",
);

fn self_hosted(server: &MockServer) -> IdeationClient {
    IdeationClient::new(Provider {
        kind: ProviderKind::SelfHosted,
        endpoint: server.uri(),
        api_key: None,
        temperature: 0.8,
        max_tokens: 2000,
    })
}

fn hosted(server: &MockServer) -> IdeationClient {
    IdeationClient::new(Provider {
        kind: ProviderKind::Hosted,
        endpoint: server.uri(),
        api_key: Some("sk-test".to_string()),
        temperature: 0.8,
        max_tokens: 2000,
    })
}

fn thinking_unsupported() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "error": "\"gemma3:4b\" does not support thinking"
    }))
}

fn body_of(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn test_thinking_unsupported_retries_once_without_think() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"think": true})))
        .respond_with(thinking_unsupported())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"think": false})))
        .respond_with(ResponseTemplate::new(200).set_body_string(HELLO_NDJSON))
        .expect(1)
        .mount(&server)
        .await;

    let mut sink = Accumulator::default();
    self_hosted(&server)
        .stream("gemma3:4b", "Generate 3 ideas", true, &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.content, vec!["Hel", "lo", ""]);
    assert_eq!(sink.content_text(), "Hello");
    assert_eq!(sink.done, 1);
}

#[tokio::test]
async fn test_retry_is_not_repeated_when_second_attempt_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"think": true})))
        .respond_with(thinking_unsupported())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"think": false})))
        .respond_with(thinking_unsupported())
        .expect(1)
        .mount(&server)
        .await;

    let result = self_hosted(&server)
        .send("gemma3:4b", "Generate 3 ideas", true)
        .await;

    let Err(IdeationError::Status { status, body }) = result else {
        panic!("expected a status error");
    };
    assert_eq!(status, 400);
    assert!(body.error_message().unwrap().contains("does not support thinking"));
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"think": true})))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "model 'nope' not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"think": false})))
        .respond_with(ResponseTemplate::new(200).set_body_string(HELLO_NDJSON))
        .expect(0)
        .mount(&server)
        .await;

    let result = self_hosted(&server).send("nope", "prompt", true).await;

    assert!(matches!(
        result,
        Err(IdeationError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_no_retry_when_reasoning_not_requested() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"think": false})))
        .respond_with(thinking_unsupported())
        .expect(1)
        .mount(&server)
        .await;

    let result = self_hosted(&server).send("gemma3:4b", "prompt", false).await;

    assert!(matches!(
        result,
        Err(IdeationError::Status { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_text_error_body_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let result = self_hosted(&server).send("qwen3:8b", "prompt", true).await;

    let Err(IdeationError::Status { status, body }) = result else {
        panic!("expected a status error");
    };
    assert_eq!(status, 502);
    assert_eq!(body, ErrorBody::Text("Bad Gateway".to_string()));
}

/// Accepts one connection, reads the full request, then answers with a body
/// shorter than its declared length and closes.
async fn truncated_error_server() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + length {
                    break;
                }
            }
        }
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_unreadable_error_body_becomes_empty_text() {
    let client = IdeationClient::new(Provider {
        kind: ProviderKind::SelfHosted,
        endpoint: truncated_error_server().await,
        api_key: None,
        temperature: 0.8,
        max_tokens: 2000,
    });

    let result = client.send("qwen3:8b", "prompt", false).await;

    let Err(IdeationError::Status { status, body }) = result else {
        panic!("expected a status error");
    };
    assert_eq!(status, 500);
    assert_eq!(body, ErrorBody::Text(String::new()));
}

#[tokio::test]
async fn test_hosted_request_shape_and_stream() {
    let server = MockServer::start().await;

    let sse = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"h\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"i\"}}],\"message\":{\"content\":\"x\"}}\n\n",
        "data: [DONE]\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"after\"}}]}\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(|request: &Request| {
            let body = body_of(request);
            body.get("think").is_none()
                && body["max_completion_tokens"] == 2000
                && body.get("max_tokens").is_none()
                && body["stream"] == true
                && body["messages"][0]["role"] == "user"
        })
        .respond_with(ResponseTemplate::new(200).set_body_string(sse))
        .expect(1)
        .mount(&server)
        .await;

    let mut sink = Accumulator::default();
    hosted(&server)
        .stream("gpt-4o-mini", "Generate 3 ideas", true, &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.content_text(), "hi");
    assert!(sink.thinking.is_empty());
    assert_eq!(sink.done, 1);
}

#[tokio::test]
async fn test_hosted_thinking_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(thinking_unsupported())
        .expect(1)
        .mount(&server)
        .await;

    let result = hosted(&server).send("gpt-4o-mini", "prompt", true).await;

    assert!(matches!(
        result,
        Err(IdeationError::Status { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_self_hosted_thinking_and_malformed_lines() {
    let server = MockServer::start().await;

    let ndjson = concat!(
        r#"{"message":{"thinking":"Consider budget."},"done":false}"#,
        "\n",
        "not json at all\n",
        r###"{"message":{"content":"## Smart Planter"},"done":false}"###,
        "\n",
        r#"{"done":true}"#,
        "\n",
        r#"{"message":{"content":"ignored"},"done":false}"#,
        "\n",
    );

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"think": true, "max_tokens": 2000})))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson))
        .expect(1)
        .mount(&server)
        .await;

    let mut sink = Accumulator::default();
    self_hosted(&server)
        .stream("qwen3:8b", "prompt", true, &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.thinking_text(), "Consider budget.");
    assert_eq!(sink.content_text(), "## Smart Planter");
    assert_eq!(sink.done, 1);
}

#[tokio::test]
async fn test_list_models() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "qwen3:8b", "size": 5_200_000_000_u64},
                {"name": "gemma3:4b"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider {
        kind: ProviderKind::SelfHosted,
        endpoint: format!("{}/", server.uri()),
        api_key: None,
        temperature: 0.8,
        max_tokens: 2000,
    };

    let models = list_models(&provider).await.unwrap();
    assert_eq!(models, vec!["qwen3:8b", "gemma3:4b"]);
}

#[tokio::test]
async fn test_list_models_unsupported_for_hosted() {
    let provider = Provider {
        kind: ProviderKind::Hosted,
        endpoint: "http://127.0.0.1:9".to_string(),
        api_key: Some("sk-test".to_string()),
        temperature: 0.8,
        max_tokens: 2000,
    };

    assert!(matches!(
        list_models(&provider).await,
        Err(IdeationError::UnsupportedProvider(_))
    ));
}
