//! Minimal HTTP abstraction used by the session core.
//!
//! The core only needs "send one request, get status + content type + body".
//! `ReqwestClient` serves the SSR proxy, `FetchClient` the browser.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{self, Either};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Full `Authorization` header value
    pub authorization: Option<String>,
    /// JSON body
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            authorization: None,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url)
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.authorization = Some(format!("Bearer {}", token));
        self
    }

    pub fn authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    pub fn json_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Response as seen by the core: nothing is parsed yet
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the declared content type is JSON (`application/json` or a `+json` type)
    pub fn is_json(&self) -> bool {
        let Some(content_type) = self.content_type.as_deref() else {
            return false;
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "application/json" || essence.ends_with("+json")
    }
}

/// The request never produced a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one request at a time; implementations must not retry.
#[allow(async_fn_in_trait)]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// The time limit passed before the wrapped future finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {0:?} elapsed")]
pub struct Elapsed(pub Duration);

/// Race `fut` against a timer; the loser is dropped, which aborts the request.
pub async fn with_timeout<F: Future>(limit: Duration, fut: F) -> Result<F::Output, Elapsed> {
    let fut = pin!(fut);
    let timer = pin!(sleep(limit));
    match future::select(fut, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(Elapsed(limit)),
    }
}

#[cfg(feature = "hydrate")]
async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

#[cfg(not(feature = "hydrate"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Server-side client built on reqwest
#[cfg(feature = "ssr")]
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

#[cfg(feature = "ssr")]
impl ReqwestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "ssr")]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        if let Some(authorization) = request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Browser client built on `fetch`
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

/// Aborts the in-flight fetch when the request future is dropped (timeout).
#[cfg(feature = "hydrate")]
struct AbortOnDrop(web_sys::AbortController);

#[cfg(feature = "hydrate")]
impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(feature = "hydrate")]
impl HttpClient for FetchClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        use gloo_net::http::Request;

        let controller =
            web_sys::AbortController::new().map_err(|e| TransportError(format!("{:?}", e)))?;
        let signal = controller.signal();
        let _abort = AbortOnDrop(controller);

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        }
        .abort_signal(Some(&signal));

        if let Some(authorization) = request.authorization.as_deref() {
            builder = builder.header("Authorization", authorization);
        }

        let prepared = match request.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}
