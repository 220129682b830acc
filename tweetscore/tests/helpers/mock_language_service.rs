//! Local stand-in for the natural-language HTTP service
//!
//! Binds `127.0.0.1:0`, records every request and answers through a reply
//! closure keyed on the request path.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

type ReplyFn = dyn Fn(&str, &Value) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    reply: Arc<ReplyFn>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockLanguageService {
    /// Value for `ClientConfig::endpoint`
    pub endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockLanguageService {
    /// Start a mock answering with `reply(path, body) -> (status, body)`
    pub async fn start<F>(reply: F) -> Self
    where
        F: Fn(&str, &Value) -> (u16, String) + Send + Sync + 'static,
    {
        Self::start_with_delay(reply, None).await
    }

    /// Start a mock that waits `delay` before answering
    pub async fn start_with_delay<F>(reply: F, delay: Option<Duration>) -> Self
    where
        F: Fn(&str, &Value) -> (u16, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply: Arc::new(reply),
            delay,
            requests: Arc::clone(&requests),
        };

        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{}/v1", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    let (status, reply) = (state.reply)(&path, &body);
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        reply,
    )
}

/// Canned successful replies for both methods, keyed on the document text
pub fn canned_reply(path: &str, body: &Value) -> (u16, String) {
    let content = body["document"]["content"].as_str().unwrap_or_default();

    if path.ends_with("documents:analyzeEntitySentiment") {
        let reply = serde_json::json!({
            "entities": [
                {
                    "name": content.split_whitespace().next().unwrap_or("none"),
                    "type": "OTHER",
                    "salience": 0.9,
                    "sentiment": {"magnitude": 0.8, "score": 0.6}
                },
                {
                    "name": "runner-up",
                    "type": "PERSON",
                    "salience": 0.1,
                    "sentiment": {"magnitude": 0.1, "score": -0.9}
                }
            ],
            "language": "en"
        });
        (200, reply.to_string())
    } else if path.ends_with("documents:analyzeSentiment") {
        let reply = serde_json::json!({
            "documentSentiment": {"magnitude": 0.4, "score": -0.2},
            "language": "en",
            "sentences": []
        });
        (200, reply.to_string())
    } else {
        (404, format!("no route for {}", path))
    }
}
