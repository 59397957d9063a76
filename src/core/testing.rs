//! Scripted `HttpClient` for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::http::{ApiRequest, ApiResponse, HttpClient, TransportError};

enum Step {
    Respond(Duration, ApiResponse),
    Fail(Duration, String),
}

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedClient {
    steps: Mutex<VecDeque<Step>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: ApiResponse) {
        self.push_delayed(Duration::ZERO, response);
    }

    pub fn push_delayed(&self, delay: Duration, response: ApiResponse) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step::Respond(delay, response));
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.push(ApiResponse::json(status, body));
    }

    pub fn push_delayed_json(&self, delay: Duration, status: u16, body: &str) {
        self.push_delayed(delay, ApiResponse::json(status, body));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step::Fail(Duration::ZERO, message.to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl HttpClient for ScriptedClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        let step = self.steps.lock().unwrap().pop_front();

        match step {
            Some(Step::Respond(delay, response)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(response)
            }
            Some(Step::Fail(delay, message)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Err(TransportError(message))
            }
            None => Err(TransportError("no scripted response".to_string())),
        }
    }
}

/// Markup response, as served by a misrouted proxy
pub fn html(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        content_type: Some("text/html; charset=utf-8".to_string()),
        body: body.to_string(),
    }
}

pub const USER_A: &str = r#"{"id": 1, "email": "a@b.com", "name": "A"}"#;

pub fn grant_body(token: &str) -> String {
    format!(
        r#"{{"success": true, "access_token": "{}", "user": {}}}"#,
        token, USER_A
    )
}
