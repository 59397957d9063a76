//! Render-time gate for protected pages.
//!
//! A `RouteGuard` lives exactly as long as one mount of the protected view.
//! It turns the current session view into a decision and makes sure the
//! redirect to the login page is issued at most once per mount.

use super::config::REDIRECT_PARAM;
use super::session::SessionState;
use super::token_store::TokenStore;

/// How much proof of identity a guarded page demands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationMode {
    /// Wait for the server to confirm the stored token
    #[default]
    ServerVerified,
    /// A stored token is enough; for low-stakes pages
    TokenPresenceOnly,
}

/// What the guard looks at on each evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardInput {
    pub is_loading: bool,
    pub is_logged_in: bool,
}

impl GuardInput {
    pub fn from_session(state: &SessionState) -> Self {
        Self {
            is_loading: state.is_loading(),
            is_logged_in: state.is_logged_in(),
        }
    }

    pub fn from_token_store(store: &dyn TokenStore) -> Self {
        Self {
            is_loading: false,
            is_logged_in: store.has_token(),
        }
    }

    /// Pick the input matching `mode`.
    pub fn resolve(mode: VerificationMode, state: &SessionState, store: &dyn TokenStore) -> Self {
        match mode {
            VerificationMode::ServerVerified => Self::from_session(state),
            VerificationMode::TokenPresenceOnly => Self::from_token_store(store),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still running
    Loading,
    /// Navigate to this URL; issued once per mount
    Redirect(String),
    /// Not logged in and the redirect is already on its way
    Fallback,
    /// Show the protected content
    Render,
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_page: String,
    has_redirected: bool,
}

impl RouteGuard {
    /// Fresh guard for a new mount.
    pub fn new(login_page: impl Into<String>) -> Self {
        Self {
            login_page: login_page.into(),
            has_redirected: false,
        }
    }

    pub fn has_redirected(&self) -> bool {
        self.has_redirected
    }

    pub fn evaluate(&mut self, input: GuardInput, current_path: &str) -> GuardDecision {
        if input.is_loading {
            return GuardDecision::Loading;
        }
        if input.is_logged_in {
            return GuardDecision::Render;
        }
        if self.has_redirected {
            return GuardDecision::Fallback;
        }

        self.has_redirected = true;
        let target = login_redirect_url(&self.login_page, current_path);
        tracing::debug!(from = current_path, to = %target, "redirecting unauthenticated visitor");
        GuardDecision::Redirect(target)
    }
}

/// `/auth/login?redirect=%2Fdashboard` for `current_path = "/dashboard"`
pub fn login_redirect_url(login_page: &str, current_path: &str) -> String {
    format!(
        "{}?{}={}",
        login_page,
        REDIRECT_PARAM,
        urlencoding::encode(current_path)
    )
}

/// Where to go after login, given the `redirect` query value.
///
/// The value arrives already percent-decoded by the router and is used as is.
/// Only same-origin absolute paths are honoured; anything else lands on `fallback`.
pub fn safe_return_path(redirect: Option<&str>, fallback: &str) -> String {
    let Some(path) = redirect else {
        return fallback.to_string();
    };

    let same_origin = path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.chars().any(char::is_control);

    if same_origin {
        path.to_string()
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token_store::MemoryTokenStore;

    const LOADING: GuardInput = GuardInput {
        is_loading: true,
        is_logged_in: false,
    };
    const LOGGED_OUT: GuardInput = GuardInput {
        is_loading: false,
        is_logged_in: false,
    };
    const LOGGED_IN: GuardInput = GuardInput {
        is_loading: false,
        is_logged_in: true,
    };

    #[test]
    fn test_loading_takes_no_action() {
        let mut guard = RouteGuard::new("/auth/login");

        for _ in 0..3 {
            assert_eq!(guard.evaluate(LOADING, "/dashboard"), GuardDecision::Loading);
        }
        assert!(!guard.has_redirected());
    }

    #[test]
    fn test_redirects_once_across_rerenders() {
        let mut guard = RouteGuard::new("/auth/login");
        let mut redirects = 0;

        for _ in 0..10 {
            if let GuardDecision::Redirect(_) = guard.evaluate(LOGGED_OUT, "/dashboard") {
                redirects += 1;
            }
        }

        assert_eq!(redirects, 1);
        assert_eq!(guard.evaluate(LOGGED_OUT, "/dashboard"), GuardDecision::Fallback);
    }

    #[test]
    fn test_redirect_carries_encoded_return_path() {
        let mut guard = RouteGuard::new("/auth/login");

        assert_eq!(
            guard.evaluate(LOGGED_OUT, "/dashboard"),
            GuardDecision::Redirect("/auth/login?redirect=%2Fdashboard".to_string())
        );
    }

    #[test]
    fn test_logged_in_renders() {
        let mut guard = RouteGuard::new("/auth/login");

        assert_eq!(guard.evaluate(LOADING, "/dashboard"), GuardDecision::Loading);
        assert_eq!(guard.evaluate(LOGGED_IN, "/dashboard"), GuardDecision::Render);
        assert!(!guard.has_redirected());
    }

    #[test]
    fn test_session_lost_mid_mount_redirects_once() {
        let mut guard = RouteGuard::new("/auth/login");

        assert_eq!(guard.evaluate(LOGGED_IN, "/coaching"), GuardDecision::Render);
        assert!(matches!(
            guard.evaluate(LOGGED_OUT, "/coaching"),
            GuardDecision::Redirect(_)
        ));
        assert_eq!(guard.evaluate(LOGGED_OUT, "/coaching"), GuardDecision::Fallback);
    }

    #[test]
    fn test_new_mount_resets_flag() {
        let mut first = RouteGuard::new("/auth/login");
        assert!(matches!(
            first.evaluate(LOGGED_OUT, "/dashboard"),
            GuardDecision::Redirect(_)
        ));

        let mut second = RouteGuard::new("/auth/login");
        assert!(matches!(
            second.evaluate(LOGGED_OUT, "/dashboard"),
            GuardDecision::Redirect(_)
        ));
    }

    #[test]
    fn test_token_presence_mode_ignores_session() {
        let store = MemoryTokenStore::with_token("maybe-stale");
        let state = SessionState::default();

        let input = GuardInput::resolve(VerificationMode::TokenPresenceOnly, &state, &store);
        assert_eq!(input, LOGGED_IN);

        let input = GuardInput::resolve(VerificationMode::ServerVerified, &state, &store);
        assert_eq!(input, LOADING);
    }

    #[test]
    fn test_token_presence_mode_without_token() {
        let store = MemoryTokenStore::new();
        let mut guard = RouteGuard::new("/auth/login");

        let input = GuardInput::resolve(
            VerificationMode::TokenPresenceOnly,
            &SessionState::default(),
            &store,
        );
        assert_eq!(
            guard.evaluate(input, "/bulletin-paie"),
            GuardDecision::Redirect("/auth/login?redirect=%2Fbulletin-paie".to_string())
        );
    }

    #[test]
    fn test_redirect_url_encodes_query() {
        assert_eq!(
            login_redirect_url("/auth/login", "/analyses/42?tab=résumé"),
            "/auth/login?redirect=%2Fanalyses%2F42%3Ftab%3Dr%C3%A9sum%C3%A9"
        );
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(None, "/dashboard"), "/dashboard");
        assert_eq!(
            safe_return_path(Some("/coaching-carriere"), "/dashboard"),
            "/coaching-carriere"
        );
        assert_eq!(
            safe_return_path(Some("/analyses/42"), "/dashboard"),
            "/analyses/42"
        );
        assert_eq!(
            safe_return_path(Some("/dashboard\n"), "/dashboard"),
            "/dashboard"
        );
        assert_eq!(
            safe_return_path(Some("https://evil.example"), "/dashboard"),
            "/dashboard"
        );
        assert_eq!(
            safe_return_path(Some("//evil.example"), "/dashboard"),
            "/dashboard"
        );
        assert_eq!(safe_return_path(Some("/\\evil"), "/dashboard"), "/dashboard");
        assert_eq!(safe_return_path(Some(""), "/dashboard"), "/dashboard");
    }

    #[test]
    fn test_safe_return_path_keeps_percent_sequences() {
        assert_eq!(
            safe_return_path(Some("/docs/100%25"), "/dashboard"),
            "/docs/100%25"
        );
        assert_eq!(
            safe_return_path(Some("/fichiers/a%2Fb"), "/dashboard"),
            "/fichiers/a%2Fb"
        );
        // an encoded prefix is not a path
        assert_eq!(safe_return_path(Some("%2F%2Fevil.example"), "/dashboard"), "/dashboard");
    }

    #[test]
    fn test_return_path_survives_redirect_round_trip() {
        let current = "/docs/100%25";
        let url = login_redirect_url("/auth/login", current);
        let query = url.split_once("?redirect=").unwrap().1;
        let decoded_by_router = urlencoding::decode(query).unwrap();

        assert_eq!(safe_return_path(Some(&*decoded_by_router), "/dashboard"), current);
    }
}
