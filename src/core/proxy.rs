//! Same-origin proxy for the backend auth API
//!
//! The browser only ever talks to `/api/auth/*` on the site origin; these
//! routes forward to the backend and relay its answer untouched:
//! - GET /api/auth/me
//! - POST /api/auth/login
//! - POST /api/auth/register
//! - POST /api/auth/logout

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use super::config::{AuthConfig, ServerConfig};
use super::http::{ApiRequest, HttpClient, Method, ReqwestClient, with_timeout};

/// Proxy state shared by all handlers
#[derive(Clone)]
pub struct ProxyState {
    client: Arc<ReqwestClient>,
    /// Backend endpoint URLs and the bound for each route
    auth: Arc<AuthConfig>,
}

impl ProxyState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: Arc::new(ReqwestClient::default()),
            auth: Arc::new(config.auth.clone()),
        }
    }
}

/// Answer relayed back to the browser
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ProxyReply {
    fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status: status.as_u16(),
            content_type: Some("application/json".to_string()),
            body: json!({ "success": false, "error": message }).to_string(),
        }
    }
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let mut builder = Response::builder().status(status);
        if let Some(content_type) = self.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(Body::from(self.body))
            .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
    }
}

/// One outgoing call to the backend
pub struct Forward {
    pub method: Method,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Option<String>,
}

/// Send `forward` to the backend and relay whatever comes back.
pub async fn forward<C: HttpClient>(client: &C, timeout: Duration, forward: Forward) -> ProxyReply {
    let url = forward.url;
    let mut request = match forward.method {
        Method::Get => ApiRequest::get(&url),
        Method::Post => ApiRequest::post(&url),
    };
    if let Some(authorization) = forward.authorization {
        request = request.authorization(authorization);
    }
    if let Some(body) = forward.body {
        request = request.json_body(body);
    }

    match with_timeout(timeout, client.send(request)).await {
        Ok(Ok(response)) => {
            tracing::debug!(%url, status = response.status, "proxied auth request");
            ProxyReply {
                status: response.status,
                content_type: response.content_type,
                body: response.body,
            }
        }
        Ok(Err(err)) => {
            tracing::warn!(%url, error = %err, "auth backend unreachable");
            ProxyReply::error(StatusCode::BAD_GATEWAY, "Authentication service unreachable")
        }
        Err(elapsed) => {
            tracing::warn!(%url, %elapsed, "auth backend timed out");
            ProxyReply::error(
                StatusCode::GATEWAY_TIMEOUT,
                "Authentication service timed out",
            )
        }
    }
}

/// Verification relay, bounded by the verify timeout
pub async fn relay_me<C: HttpClient>(
    client: &C,
    auth: &AuthConfig,
    authorization: Option<String>,
) -> ProxyReply {
    let Some(authorization) = authorization else {
        return ProxyReply {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            content_type: Some("application/json".to_string()),
            body: json!({ "error": "Missing authentication token" }).to_string(),
        };
    };

    let call = Forward {
        method: Method::Get,
        url: auth.me_url(),
        authorization: Some(authorization),
        body: None,
    };
    forward(client, auth.verify_timeout, call).await
}

pub async fn relay_login<C: HttpClient>(client: &C, auth: &AuthConfig, body: String) -> ProxyReply {
    let call = Forward {
        method: Method::Post,
        url: auth.login_url(),
        authorization: None,
        body: Some(body),
    };
    forward(client, auth.auth_timeout, call).await
}

pub async fn relay_register<C: HttpClient>(
    client: &C,
    auth: &AuthConfig,
    body: String,
) -> ProxyReply {
    let call = Forward {
        method: Method::Post,
        url: auth.register_url(),
        authorization: None,
        body: Some(body),
    };
    forward(client, auth.auth_timeout, call).await
}

pub async fn relay_logout<C: HttpClient>(
    client: &C,
    auth: &AuthConfig,
    authorization: Option<String>,
) -> ProxyReply {
    let call = Forward {
        method: Method::Post,
        url: auth.logout_url(),
        authorization,
        body: None,
    };
    forward(client, auth.logout_timeout, call).await
}

/// Raw `Authorization` header value, if present and non-empty
fn authorization_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// GET /api/auth/me
async fn me(State(state): State<ProxyState>, headers: HeaderMap) -> ProxyReply {
    relay_me(state.client.as_ref(), &state.auth, authorization_header(&headers)).await
}

/// POST /api/auth/login
async fn login(State(state): State<ProxyState>, body: String) -> ProxyReply {
    relay_login(state.client.as_ref(), &state.auth, body).await
}

/// POST /api/auth/register
async fn register(State(state): State<ProxyState>, body: String) -> ProxyReply {
    relay_register(state.client.as_ref(), &state.auth, body).await
}

/// POST /api/auth/logout
async fn logout(State(state): State<ProxyState>, headers: HeaderMap) -> ProxyReply {
    relay_logout(state.client.as_ref(), &state.auth, authorization_header(&headers)).await
}

/// Create the auth proxy router
pub fn auth_proxy_router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .with_state(state)
}
