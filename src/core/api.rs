//! Client for the credential endpoints: login, register and logout.
//!
//! All calls share the verifier's discipline: bounded wait, JSON-only
//! responses, and a typed failure instead of a parse panic.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::config::AuthConfig;
use super::error::AuthError;
use super::http::{ApiRequest, ApiResponse, HttpClient};
use super::models::{AuthEnvelope, AuthGrant, LoginRequest, RegisterRequest};
use super::verifier::{ensure_json, exchange, parse_json};

/// Which credential endpoint produced a response; decides how refusals are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Login,
    Register,
}

pub struct AuthApi<C> {
    client: Arc<C>,
    login_url: String,
    register_url: String,
    logout_url: String,
    auth_timeout: Duration,
    logout_timeout: Duration,
}

impl<C: HttpClient> AuthApi<C> {
    pub fn new(client: Arc<C>, config: &AuthConfig) -> Self {
        Self {
            client,
            login_url: config.login_url(),
            register_url: config.register_url(),
            logout_url: config.logout_url(),
            auth_timeout: config.auth_timeout,
            logout_timeout: config.logout_timeout,
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthGrant, AuthError> {
        let response = self.post_json(&self.login_url, request).await?;
        classify(Flow::Login, &response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthGrant, AuthError> {
        let response = self.post_json(&self.register_url, request).await?;
        classify(Flow::Register, &response)
    }

    /// Tell the server the token is no longer in use. The body is ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let request = ApiRequest::post(&self.logout_url).bearer(token);
        let response = exchange(self.client.as_ref(), request, self.logout_timeout).await?;

        if response.is_success() {
            Ok(())
        } else {
            Err(AuthError::ServerError {
                status: response.status,
                message: format!("logout refused with HTTP {}", response.status),
            })
        }
    }

    async fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<ApiResponse, AuthError> {
        let body = serde_json::to_string(body)
            .map_err(|e| AuthError::MalformedResponse(format!("cannot encode request: {}", e)))?;
        let request = ApiRequest::post(url).json_body(body);
        exchange(self.client.as_ref(), request, self.auth_timeout).await
    }
}

/// Turn a login/register response into a grant or a taxonomy error.
fn classify(flow: Flow, response: &ApiResponse) -> Result<AuthGrant, AuthError> {
    ensure_json(response)?;
    let envelope: AuthEnvelope = parse_json(response)?;
    let detail = envelope.error_detail();
    let refused = envelope.success == Some(false);

    if response.is_success() && !refused {
        return envelope.into_grant().ok_or_else(|| {
            AuthError::MalformedResponse("missing access_token or user".to_string())
        });
    }

    let status = response.status;
    // the credential route is not wired up, so the detail is not about the user
    if matches!(status, 404 | 405) {
        tracing::warn!(status, flow = ?flow, "auth endpoint not routed");
        return Err(AuthError::ServerMisconfigured);
    }
    if status >= 500 {
        return Err(AuthError::ServerError {
            status,
            message: detail.unwrap_or_else(|| format!("HTTP {}", status)),
        });
    }

    Err(match flow {
        Flow::Login => match detail {
            Some(detail) => AuthError::InvalidCredentials(detail),
            None => AuthError::invalid_credentials(),
        },
        Flow::Register => {
            AuthError::Rejected(detail.unwrap_or_else(|| "Registration failed".to_string()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{ScriptedClient, grant_body, html};

    fn api(client: &Arc<ScriptedClient>) -> AuthApi<ScriptedClient> {
        AuthApi::new(client.clone(), &AuthConfig::default())
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            email: "marie@example.com".to_string(),
            username: "marie".to_string(),
            password: "s3cret-pass".to_string(),
            first_name: "Marie".to_string(),
            last_name: "Curie".to_string(),
            role: RegisterRequest::DEFAULT_ROLE.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(200, &grant_body("tok-1"));

        let grant = api(&client)
            .login(&LoginRequest::new("a@b.com", "pw"))
            .await
            .unwrap();

        assert_eq!(grant.access_token, "tok-1");
        assert_eq!(grant.user.email, "a@b.com");

        let sent = client.requests();
        assert_eq!(sent[0].url, "/api/auth/login");
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["password"], "pw");
        assert!(sent[0].authorization.is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(401, r#"{"success": false, "detail": "Invalid credentials"}"#);

        let result = api(&client)
            .login(&LoginRequest::new("a@b.com", "wrongpass"))
            .await;

        assert_eq!(
            result,
            Err(AuthError::InvalidCredentials("Invalid credentials".to_string()))
        );
    }

    #[tokio::test]
    async fn test_login_refused_with_200() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(200, r#"{"success": false, "error": "Compte désactivé"}"#);

        let result = api(&client).login(&LoginRequest::new("a@b.com", "pw")).await;

        assert_eq!(
            result,
            Err(AuthError::InvalidCredentials("Compte désactivé".to_string()))
        );
    }

    #[tokio::test]
    async fn test_login_html_is_misconfiguration() {
        let client = Arc::new(ScriptedClient::new());
        client.push(html(404, "<html>404: This page could not be found.</html>"));

        let result = api(&client).login(&LoginRequest::new("a@b.com", "pw")).await;
        assert_eq!(result, Err(AuthError::ServerMisconfigured));
    }

    #[tokio::test]
    async fn test_login_not_found_is_misconfiguration() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(404, r#"{"detail": "Not Found"}"#);
        client.push_json(405, r#"{"detail": "Method Not Allowed"}"#);

        let api = api(&client);
        for _ in 0..2 {
            let result = api.login(&LoginRequest::new("a@b.com", "pw")).await;
            assert_eq!(result, Err(AuthError::ServerMisconfigured));
        }
    }

    #[tokio::test]
    async fn test_login_server_error() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(500, r#"{"detail": "Erreur lors de la connexion: db down"}"#);

        let result = api(&client).login(&LoginRequest::new("a@b.com", "pw")).await;

        assert_eq!(
            result,
            Err(AuthError::ServerError {
                status: 500,
                message: "Erreur lors de la connexion: db down".to_string()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_timeout_is_ten_seconds() {
        let client = Arc::new(ScriptedClient::new());
        client.push_delayed_json(Duration::from_secs(9), 200, &grant_body("slow-but-ok"));
        client.push_delayed_json(Duration::from_secs(11), 200, &grant_body("too-slow"));

        let api = api(&client);
        assert!(api.login(&LoginRequest::new("a@b.com", "pw")).await.is_ok());
        assert_eq!(
            api.login(&LoginRequest::new("a@b.com", "pw")).await,
            Err(AuthError::Timeout)
        );
    }

    #[tokio::test]
    async fn test_register_sends_full_profile() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(201, &grant_body("tok-new"));

        let grant = api(&client).register(&register_request()).await.unwrap();
        assert_eq!(grant.access_token, "tok-new");

        let sent = client.requests();
        assert_eq!(sent[0].url, "/api/auth/register");
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "marie");
        assert_eq!(body["first_name"], "Marie");
        assert_eq!(body["last_name"], "Curie");
        assert_eq!(body["role"], "user");
    }

    #[tokio::test]
    async fn test_register_rejected() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(400, r#"{"detail": "Email déjà utilisé"}"#);

        let result = api(&client).register(&register_request()).await;
        assert_eq!(result, Err(AuthError::Rejected("Email déjà utilisé".to_string())));
    }

    #[tokio::test]
    async fn test_register_success_without_token_is_malformed() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(200, r#"{"success": true, "message": "check your inbox"}"#);

        let result = api(&client).register(&register_request()).await;
        assert!(matches!(result, Err(AuthError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_register_html_is_misconfiguration() {
        let client = Arc::new(ScriptedClient::new());
        client.push(html(200, "<!DOCTYPE html><html><body>Paycoach</body></html>"));

        let result = api(&client).register(&register_request()).await;
        assert_eq!(result, Err(AuthError::ServerMisconfigured));
    }

    #[tokio::test]
    async fn test_register_not_found_is_misconfiguration() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(404, r#"{"detail": "Not Found"}"#);

        let result = api(&client).register(&register_request()).await;
        assert_eq!(result, Err(AuthError::ServerMisconfigured));
    }

    #[tokio::test]
    async fn test_register_network_failure() {
        let client = Arc::new(ScriptedClient::new());
        client.push_transport_error("connection refused");

        let result = api(&client).register(&register_request()).await;
        assert!(matches!(result, Err(AuthError::NetworkFailure(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_timeout() {
        let client = Arc::new(ScriptedClient::new());
        client.push_delayed_json(Duration::from_secs(11), 201, &grant_body("too-slow"));

        let result = api(&client).register(&register_request()).await;
        assert_eq!(result, Err(AuthError::Timeout));
    }

    #[tokio::test]
    async fn test_logout_sends_bearer() {
        let client = Arc::new(ScriptedClient::new());
        client.push_json(200, r#"{"success": true}"#);

        api(&client).logout("tok-1").await.unwrap();

        let sent = client.requests();
        assert_eq!(sent[0].url, "/api/auth/logout");
        assert_eq!(sent[0].authorization.as_deref(), Some("Bearer tok-1"));
        assert!(sent[0].body.is_none());
    }

    #[tokio::test]
    async fn test_logout_failure_is_reported() {
        let client = Arc::new(ScriptedClient::new());
        client.push_transport_error("network unreachable");

        let result = api(&client).logout("tok-1").await;
        assert!(matches!(result, Err(AuthError::NetworkFailure(_))));
    }
}
