//! End-to-end tests for the webhook endpoint with mocked transports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use teloxide::types::ChatId;
use tower::ServiceExt;

use flanrelay::api::{InferenceApi, TelegramApi};
use flanrelay::dispatcher::{APOLOGY_MESSAGE, WELCOME_MESSAGE};
use flanrelay::inference::{self, extract_generated_text};
use flanrelay::server::{ACK_BODY, router};
use flanrelay::Dispatcher;

#[derive(Default)]
struct RecordingTelegram {
    sent: Mutex<Vec<(ChatId, String)>>,
}

#[async_trait]
impl TelegramApi for RecordingTelegram {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<i64, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((chat_id, text.to_string()));
        Ok(sent.len() as i64)
    }
}

/// Answers every prompt by running a canned HTTP response through the real validation.
struct CannedInference {
    status: reqwest::StatusCode,
    body: &'static str,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl InferenceApi for CannedInference {
    async fn generate(&self, prompt: &str) -> Result<String, inference::Error> {
        self.calls.lock().unwrap().push(prompt.to_string());
        extract_generated_text(self.status, self.body)
    }
}

struct Harness {
    telegram: Arc<RecordingTelegram>,
    inference: Arc<CannedInference>,
    app: axum::Router,
}

fn harness(status: reqwest::StatusCode, body: &'static str) -> Harness {
    let telegram = Arc::new(RecordingTelegram::default());
    let inference = Arc::new(CannedInference {
        status,
        body,
        calls: Mutex::new(Vec::new()),
    });
    let dispatcher = Arc::new(Dispatcher::new(telegram.clone(), inference.clone()));
    Harness {
        telegram,
        inference,
        app: router(dispatcher),
    }
}

async fn post(app: &axum::Router, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/api")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn update(chat_id: i64, text: &str) -> String {
    serde_json::json!({
        "update_id": 900,
        "message": {
            "message_id": 12,
            "date": 1700000000,
            "chat": {"id": chat_id, "type": "private", "first_name": "Test"},
            "from": {"id": chat_id, "is_bot": false, "first_name": "Test"},
            "text": text
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_start_gets_welcome() {
    let h = harness(reqwest::StatusCode::OK, r#"[{"generated_text":"unused"}]"#);

    let (status, body) = post(&h.app, update(101, "/start")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ACK_BODY);
    assert_eq!(
        *h.telegram.sent.lock().unwrap(),
        vec![(ChatId(101), WELCOME_MESSAGE.to_string())]
    );
    assert!(h.inference.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_prompt_gets_generated_text() {
    let h = harness(reqwest::StatusCode::OK, r#"[{"generated_text":"Hello!"}]"#);

    let (status, body) = post(&h.app, update(202, "greet me")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ACK_BODY);
    assert_eq!(*h.inference.calls.lock().unwrap(), vec!["greet me".to_string()]);
    assert_eq!(
        *h.telegram.sent.lock().unwrap(),
        vec![(ChatId(202), "Hello!".to_string())]
    );
}

#[tokio::test]
async fn test_bad_inference_responses_get_apology() {
    let cases = [
        (reqwest::StatusCode::OK, "[]"),
        (reqwest::StatusCode::OK, "{}"),
        (reqwest::StatusCode::OK, r#"[{"generated_text":""}]"#),
        (reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        (reqwest::StatusCode::OK, "<html>gateway</html>"),
    ];
    for (inference_status, inference_body) in cases {
        let h = harness(inference_status, inference_body);

        let (status, body) = post(&h.app, update(303, "anything")).await;

        assert_eq!(status, StatusCode::OK, "case {inference_body:?}");
        assert_eq!(body, ACK_BODY);
        assert_eq!(
            *h.telegram.sent.lock().unwrap(),
            vec![(ChatId(303), APOLOGY_MESSAGE.to_string())],
            "case {inference_body:?}"
        );
    }
}

#[tokio::test]
async fn test_malformed_body_is_silently_dropped() {
    let h = harness(reqwest::StatusCode::OK, r#"[{"generated_text":"unused"}]"#);

    let (status, body) = post(&h.app, "definitely not json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert!(h.telegram.sent.lock().unwrap().is_empty());
    assert!(h.inference.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_without_text_is_ignored() {
    let h = harness(reqwest::StatusCode::OK, r#"[{"generated_text":"unused"}]"#);
    let body = r#"{"update_id":5,"message":{"message_id":1,"chat":{"id":7,"type":"private"},"photo":[]}}"#;

    let (status, body) = post(&h.app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert!(h.telegram.sent.lock().unwrap().is_empty());
    assert!(h.inference.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_health() {
    let h = harness(reqwest::StatusCode::OK, "[]");
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = h.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
