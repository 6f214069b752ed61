#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use inquiry_relay::api::create_router;
use inquiry_relay::config::Config;
use inquiry_relay::mail::{MailError, MailTransport, Mailer, OutboundMessage, SentMessage};
use inquiry_relay::state::AppState;

pub const ACCOUNT: &str = "studio@example.com";

/// Records every send; sends whose 1-based index is in `fail_on` return an error.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutboundMessage>>,
    attempts: Mutex<usize>,
    fail_on: Vec<usize>,
}

impl RecordingTransport {
    pub fn failing_on(fail_on: &[usize]) -> Self {
        Self {
            fail_on: fail_on.to_vec(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: OutboundMessage) -> Result<SentMessage, MailError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };

        if self.fail_on.contains(&attempt) {
            return Err(MailError::Transport("connection refused".to_string()));
        }

        self.sent.lock().unwrap().push(message);
        Ok(SentMessage {
            message_id: format!("<msg-{}@example.com>", attempt),
        })
    }

    async fn verify(&self) -> Result<(), MailError> {
        Ok(())
    }
}

pub fn config(overrides: &[(&'static str, &'static str)]) -> Config {
    let mut env: HashMap<&str, &str> = HashMap::from([
        ("EMAIL_HOST", "smtp.example.com"),
        ("EMAIL_PORT", "587"),
        ("EMAIL_USER", ACCOUNT),
        ("EMAIL_PASS", "secret"),
    ]);
    env.extend(overrides.iter().copied());
    Config::from_lookup(|key| env.get(key).map(|v| v.to_string())).expect("Should load config")
}

pub fn app(transport: Arc<RecordingTransport>, config: Config) -> Router {
    let mailer = Mailer::new(
        transport,
        config.smtp.username.clone(),
        config.senders.clone(),
    );
    create_router(AppState::new(config, mailer))
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
