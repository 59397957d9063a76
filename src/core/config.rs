//! Session and endpoint configuration.
//!
//! On the server, load it with `ServerConfig::from_env()` after calling `dotenvy::dotenv()`.
//! The browser build uses `AuthConfig::default()`, which talks to the same-origin proxy.

use std::time::Duration;

/// Storage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

/// Query parameter carrying the return path on the login page
pub const REDIRECT_PARAM: &str = "redirect";

const DEFAULT_BACKEND_URL: &str = "http://localhost:8002";
const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_LOGOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Endpoint paths and timing for the auth session core.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    /// Prefix prepended to every endpoint path. Empty means same-origin.
    pub api_base_url: String,

    /// Current-user endpoint used for session verification
    pub me_path: String,
    pub login_path: String,
    pub register_path: String,
    pub logout_path: String,

    /// Page unauthenticated visitors are sent to
    pub login_page: String,

    /// Page a successful login lands on when no return path was given
    pub home_page: String,

    /// Upper bound for the mount-time verification call
    pub verify_timeout: Duration,

    /// Upper bound for login and register calls
    pub auth_timeout: Duration,

    /// Upper bound for the best-effort logout notification
    pub logout_timeout: Duration,
}

impl AuthConfig {
    /// Build a config whose endpoints live under `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    pub fn me_url(&self) -> String {
        self.endpoint(&self.me_path)
    }

    pub fn login_url(&self) -> String {
        self.endpoint(&self.login_path)
    }

    pub fn register_url(&self) -> String {
        self.endpoint(&self.register_path)
    }

    pub fn logout_url(&self) -> String {
        self.endpoint(&self.logout_path)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            me_path: "/api/auth/me".to_string(),
            login_path: "/api/auth/login".to_string(),
            register_path: "/api/auth/register".to_string(),
            logout_path: "/api/auth/logout".to_string(),
            login_page: "/auth/login".to_string(),
            home_page: "/dashboard".to_string(),
            verify_timeout: DEFAULT_VERIFY_TIMEOUT,
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            logout_timeout: DEFAULT_LOGOUT_TIMEOUT,
        }
    }
}

/// Server-side configuration for the auth proxy.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Backend that owns the real `/api/auth/*` endpoints
    pub backend_url: String,

    /// Backend endpoint URLs and the per-route proxy timeouts
    pub auth: AuthConfig,
}

#[cfg(feature = "ssr")]
impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        let backend_url = std::env::var("PAYCOACH_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let mut auth = AuthConfig::with_base_url(backend_url.clone());
        if let Some(timeout) = duration_from_env("PAYCOACH_VERIFY_TIMEOUT_MS") {
            auth.verify_timeout = timeout;
        }
        if let Some(timeout) = duration_from_env("PAYCOACH_AUTH_TIMEOUT_MS") {
            auth.auth_timeout = timeout;
        }
        if let Some(timeout) = duration_from_env("PAYCOACH_LOGOUT_TIMEOUT_MS") {
            auth.logout_timeout = timeout;
        }

        Self { backend_url, auth }
    }
}

#[cfg(feature = "ssr")]
fn duration_from_env(key: &str) -> Option<Duration> {
    let raw = std::env::var(key).ok()?;
    match parse_millis(&raw) {
        Some(duration) => Some(duration),
        None => {
            tracing::warn!(key, value = %raw, "ignoring invalid timeout");
            None
        }
    }
}

/// Parse a positive millisecond count.
#[cfg_attr(not(feature = "ssr"), allow(dead_code))]
fn parse_millis(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = AuthConfig::default();

        assert_eq!(config.verify_timeout, Duration::from_secs(5));
        assert_eq!(config.auth_timeout, Duration::from_secs(10));
        assert_eq!(config.logout_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_endpoints_are_same_origin() {
        let config = AuthConfig::default();

        assert_eq!(config.me_url(), "/api/auth/me");
        assert_eq!(config.login_url(), "/api/auth/login");
        assert_eq!(config.register_url(), "/api/auth/register");
        assert_eq!(config.logout_url(), "/api/auth/logout");
        assert_eq!(config.login_page, "/auth/login");
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = AuthConfig::with_base_url("http://backend:8002/");

        assert_eq!(config.me_url(), "http://backend:8002/api/auth/me");
        assert_eq!(config.login_url(), "http://backend:8002/api/auth/login");
    }

    #[test]
    fn test_parse_millis() {
        assert_eq!(parse_millis("2500"), Some(Duration::from_millis(2500)));
        assert_eq!(parse_millis(" 100 "), Some(Duration::from_millis(100)));
        assert_eq!(parse_millis("0"), None);
        assert_eq!(parse_millis("-5"), None);
        assert_eq!(parse_millis("soon"), None);
    }

    #[test]
    fn test_config_clone() {
        let config = AuthConfig::with_base_url("http://localhost:9000");
        let cloned = config.clone();

        assert_eq!(config, cloned);
    }
}
