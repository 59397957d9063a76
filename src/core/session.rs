//! Session controller: owns `{user, is_loading}` and drives the auth flows.
//!
//! Every operation takes a generation number before it suspends. When it
//! resumes, its result is applied only if no newer operation has started
//! in the meantime, so a slow verification can never undo a logout.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::api::AuthApi;
use super::config::AuthConfig;
use super::error::AuthError;
use super::http::HttpClient;
use super::models::{AuthGrant, AuthOutcome, LoginRequest, RegisterRequest, User};
use super::token_store::TokenStore;
use super::verifier::SessionVerifier;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Mount-time token check in progress
    #[default]
    Initializing,
    /// Login or register call in flight
    Authenticating,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of the session as seen by guards and UI
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<User>,
}

impl SessionState {
    fn settled(user: Option<User>) -> Self {
        let phase = if user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        };
        Self { phase, user }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Initializing | SessionPhase::Authenticating
        )
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

type Observer = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct Inner<C> {
    store: Arc<dyn TokenStore>,
    verifier: SessionVerifier<C>,
    api: AuthApi<C>,
    state: Mutex<SessionState>,
    generation: AtomicU64,
    observers: Mutex<Vec<Observer>>,
}

/// Handle to the session controller; clones share the same session.
pub struct AuthSession<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for AuthSession<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: HttpClient> AuthSession<C> {
    pub fn new(config: &AuthConfig, store: Arc<dyn TokenStore>, client: Arc<C>) -> Self {
        let verifier =
            SessionVerifier::new(Arc::clone(&client), config.me_url(), config.verify_timeout);
        let api = AuthApi::new(client, config);

        Self {
            inner: Arc::new(Inner {
                store,
                verifier,
                api,
                state: Mutex::new(SessionState::default()),
                generation: AtomicU64::new(0),
                observers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.lock_state().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading()
    }

    pub fn is_logged_in(&self) -> bool {
        self.lock_state().is_logged_in()
    }

    /// Current bearer token, for callers that attach it to their own requests
    pub fn token(&self) -> Option<String> {
        self.inner.store.get()
    }

    /// Register a callback run after every state transition.
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + Send + Sync + 'static) {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    /// Mount-time check: restore the session from the stored token, if any.
    pub async fn initialize(&self) {
        let generation = self.advance();
        self.transition(SessionState {
            phase: SessionPhase::Initializing,
            user: None,
        });

        let Some(token) = self.inner.store.get() else {
            tracing::debug!("no stored token");
            self.apply_if_current(generation, SessionState::settled(None));
            return;
        };

        let result = self.inner.verifier.verify(&token).await;
        if !self.is_current(generation) {
            tracing::debug!(generation, "discarding superseded verification");
            return;
        }

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session restored");
                self.transition(SessionState::settled(Some(user)));
            }
            Err(err) => {
                tracing::warn!(code = err.code(), error = %err, "stored token rejected, signing out");
                self.inner.store.clear();
                self.transition(SessionState::settled(None));
            }
        }
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<User, AuthError> {
        let generation = self.begin_authenticating();
        let result = self.inner.api.login(&credentials).await;
        self.finish_authenticating(generation, "login", result)
    }

    pub async fn register(&self, profile: RegisterRequest) -> Result<User, AuthError> {
        let generation = self.begin_authenticating();
        let result = self.inner.api.register(&profile).await;
        self.finish_authenticating(generation, "register", result)
    }

    /// Sign out. Local state is always cleared, whatever the server says,
    /// unless a newer sign-in has already stored its own token.
    pub async fn logout(&self) -> AuthOutcome {
        let generation = self.advance();
        let token = self.inner.store.get();

        if let Some(token) = &token {
            if let Err(err) = self.inner.api.logout(token).await {
                tracing::warn!(code = err.code(), error = %err, "server logout failed, clearing locally");
            }
        }

        let superseded = !self.is_current(generation);
        if superseded && self.inner.store.get() != token {
            tracing::debug!(generation, "newer sign-in took over during logout, keeping it");
            return AuthOutcome::ok(None);
        }

        self.inner.store.clear();
        // a newer login still in flight keeps its phase, but never the old user
        let phase = match self.state().phase {
            SessionPhase::Authenticating if superseded => SessionPhase::Authenticating,
            _ => SessionPhase::Unauthenticated,
        };
        self.transition(SessionState { phase, user: None });
        tracing::info!("signed out");

        AuthOutcome::ok(None)
    }

    fn begin_authenticating(&self) -> u64 {
        let generation = self.advance();
        let user = self.user();
        self.transition(SessionState {
            phase: SessionPhase::Authenticating,
            user,
        });
        generation
    }

    fn finish_authenticating(
        &self,
        generation: u64,
        flow: &'static str,
        result: Result<AuthGrant, AuthError>,
    ) -> Result<User, AuthError> {
        if !self.is_current(generation) {
            tracing::debug!(flow, generation, "discarding superseded response");
            return Err(AuthError::Superseded);
        }

        match result {
            Ok(grant) => {
                self.inner.store.set(&grant.access_token);
                tracing::info!(flow, user_id = %grant.user.id, "authenticated");
                self.transition(SessionState::settled(Some(grant.user.clone())));
                Ok(grant.user)
            }
            Err(err) => {
                tracing::warn!(flow, code = err.code(), error = %err, "authentication failed");
                let user = self.user();
                self.transition(SessionState::settled(user));
                Err(err)
            }
        }
    }

    fn advance(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    fn apply_if_current(&self, generation: u64, state: SessionState) {
        if self.is_current(generation) {
            self.transition(state);
        }
    }

    fn transition(&self, next: SessionState) {
        {
            let mut state = self.lock_state();
            if *state == next {
                return;
            }
            *state = next.clone();
        }

        let observers = self
            .inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in observers {
            observer(&next);
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
