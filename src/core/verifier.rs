//! Server-side validation of a stored bearer token.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::AuthError;
use super::http::{ApiRequest, ApiResponse, HttpClient, with_timeout};
use super::models::User;

/// Send `request` under `limit`, mapping transport trouble onto the taxonomy.
pub(crate) async fn exchange<C: HttpClient>(
    client: &C,
    request: ApiRequest,
    limit: Duration,
) -> Result<ApiResponse, AuthError> {
    let url = request.url.clone();
    match with_timeout(limit, client.send(request)).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => {
            tracing::debug!(%url, error = %err, "request failed");
            Err(AuthError::NetworkFailure(err.to_string()))
        }
        Err(elapsed) => {
            tracing::debug!(%url, %elapsed, "request timed out");
            Err(AuthError::Timeout)
        }
    }
}

/// Refuse anything that is not declared as JSON before trying to parse it.
pub(crate) fn ensure_json(response: &ApiResponse) -> Result<(), AuthError> {
    if response.is_json() {
        Ok(())
    } else {
        tracing::warn!(
            status = response.status,
            content_type = response.content_type.as_deref().unwrap_or("<none>"),
            "expected JSON from auth endpoint"
        );
        Err(AuthError::ServerMisconfigured)
    }
}

pub(crate) fn parse_json<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, AuthError> {
    serde_json::from_str(&response.body).map_err(|e| AuthError::MalformedResponse(e.to_string()))
}

/// `/me` answers with either the bare user or `{user: {...}}`
#[derive(Deserialize)]
#[serde(untagged)]
enum MeResponse {
    Wrapped { user: User },
    Bare(User),
}

/// Validates a token against the current-user endpoint
pub struct SessionVerifier<C> {
    client: Arc<C>,
    me_url: String,
    timeout: Duration,
}

impl<C: HttpClient> SessionVerifier<C> {
    pub fn new(client: Arc<C>, me_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            me_url: me_url.into(),
            timeout,
        }
    }

    /// Fetch the user the token belongs to.
    pub async fn verify(&self, token: &str) -> Result<User, AuthError> {
        if token.is_empty() {
            return Err(AuthError::TokenInvalidOrExpired);
        }

        let request = ApiRequest::get(&self.me_url).bearer(token);
        let response = exchange(self.client.as_ref(), request, self.timeout).await?;

        if matches!(response.status, 401 | 403) {
            return Err(AuthError::TokenInvalidOrExpired);
        }
        ensure_json(&response)?;
        if !response.is_success() {
            return Err(AuthError::ServerError {
                status: response.status,
                message: error_message(&response),
            });
        }

        match parse_json::<MeResponse>(&response)? {
            MeResponse::Wrapped { user } | MeResponse::Bare(user) => Ok(user),
        }
    }
}

/// Best-effort extraction of a server error message from a JSON body
fn error_message(response: &ApiResponse) -> String {
    serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| {
            ["detail", "error", "message"]
                .iter()
                .find_map(|key| body.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}
