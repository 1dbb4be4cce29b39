//! GeminiClient against a local stand-in for the generateContent endpoint.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use teachclone_core::Error;
use teachclone_llm::{chat_reply, GeminiClient, TextGenerator};

async fn fake_generate(
    Path(rest): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": 403, "message": "API key not valid"}})),
        );
    }
    assert!(rest.ends_with("gemini-test:generateContent"), "{}", rest);
    assert_eq!(body["generationConfig"]["temperature"], 0.7);
    assert_eq!(body["generationConfig"]["topP"], 0.95);

    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    let reply = if prompt.contains("Student's message: Hello") {
        "Hello, my dear student."
    } else {
        "echo"
    };
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": reply}]}}]
        })),
    )
}

async fn spawn_fake_gemini() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = Router::new().route("/models/{*rest}", post(fake_generate));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

fn profile() -> teachclone_core::TeacherProfile {
    serde_json::from_value(json!({
        "name": "Ms. Rivera",
        "style": "Story-driven",
        "tone": "Gentle",
        "strengths": ["Patience"],
        "specializations": ["History"],
        "useAnalogies": false,
        "stepByStep": true
    }))
    .unwrap()
}

#[tokio::test]
async fn test_generates_text_from_candidates() {
    let base = spawn_fake_gemini().await;
    let client = GeminiClient::new(reqwest::Client::new(), "test-key", "gemini-test").with_base_url(base);

    assert_eq!(client.model_name(), "gemini-test");
    let reply = chat_reply(
        &client,
        teachclone_core::ChatTemplate::Elaborate,
        &profile(),
        "Hello",
    )
    .await
    .unwrap();
    assert_eq!(reply, "Hello, my dear student.");
}

#[tokio::test]
async fn test_api_error_is_upstream_with_message() {
    let base = spawn_fake_gemini().await;
    let client = GeminiClient::new(reqwest::Client::new(), "wrong-key", "gemini-test").with_base_url(base);

    let err = client.generate("anything").await.unwrap_err();
    match err {
        Error::Upstream(msg) => {
            assert!(msg.contains("403"), "{}", msg);
            assert!(msg.contains("API key not valid"), "{}", msg);
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_provider_is_upstream() {
    let client = GeminiClient::new(reqwest::Client::new(), "test-key", "gemini-test")
        .with_base_url("http://127.0.0.1:9");
    assert!(matches!(client.generate("hi").await, Err(Error::Upstream(_))));
}
