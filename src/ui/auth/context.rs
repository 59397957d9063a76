//! Authentication context for the Leptos tree
//!
//! Wraps one [`AuthSession`] per page load and mirrors its state into a
//! signal so components re-render on every transition. The session is
//! only initialized in the browser; during SSR it stays in the
//! initializing phase and guards render their loading placeholder.

use std::sync::Arc;

use leptos::prelude::*;

use crate::core::{
    AuthConfig, AuthError, AuthOutcome, AuthSession, GuardInput, LoginRequest, RegisterRequest,
    SessionState, TokenStore, User, VerificationMode,
};

#[cfg(feature = "hydrate")]
type ClientImpl = crate::core::http::FetchClient;
#[cfg(not(feature = "hydrate"))]
type ClientImpl = crate::core::http::ReqwestClient;

#[cfg(feature = "hydrate")]
type StoreImpl = crate::core::BrowserTokenStore;
#[cfg(not(feature = "hydrate"))]
type StoreImpl = crate::core::MemoryTokenStore;

pub type AppSession = AuthSession<ClientImpl>;

/// Authentication context shared across the app
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Mirror of the session state
    pub state: RwSignal<SessionState>,
    /// Last user-facing error from login or register
    pub error: RwSignal<Option<String>>,
    /// Whether a login/register call is in flight from a form
    pub submitting: RwSignal<bool>,
    session: StoredValue<AppSession>,
    store: StoredValue<Arc<dyn TokenStore>>,
    config: StoredValue<AuthConfig>,
}

impl AuthContext {
    fn new(config: AuthConfig, store: Arc<dyn TokenStore>, client: Arc<ClientImpl>) -> Self {
        let session = AuthSession::new(&config, store.clone(), client);

        let state = RwSignal::new(session.state());
        session.subscribe(move |next| {
            let _ = state.try_set(next.clone());
        });

        Self {
            state,
            error: RwSignal::new(None),
            submitting: RwSignal::new(false),
            session: StoredValue::new(session),
            store: StoredValue::new(store),
            config: StoredValue::new(config),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(SessionState::is_loading)
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.with(SessionState::is_logged_in)
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|state| state.user.clone())
    }

    pub fn login_page(&self) -> String {
        self.config.with_value(|config| config.login_page.clone())
    }

    pub fn home_page(&self) -> String {
        self.config.with_value(|config| config.home_page.clone())
    }

    /// Guard input for `mode`, tracking every session transition.
    ///
    /// Token presence is unknown until `mounted`, since the store lives in the browser.
    pub fn guard_input(&self, mode: VerificationMode, mounted: bool) -> GuardInput {
        if mode == VerificationMode::TokenPresenceOnly && !mounted {
            return GuardInput {
                is_loading: true,
                is_logged_in: false,
            };
        }
        self.state.with(|state| {
            self.store
                .with_value(|store| GuardInput::resolve(mode, state, store.as_ref()))
        })
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    pub async fn login(&self, email: String, password: String) -> AuthOutcome {
        let session = self.session.get_value();
        self.run_form(session.login(LoginRequest::new(email, password)))
            .await
    }

    pub async fn register(&self, profile: RegisterRequest) -> AuthOutcome {
        let session = self.session.get_value();
        self.run_form(session.register(profile)).await
    }

    pub async fn logout(&self) -> AuthOutcome {
        let session = self.session.get_value();
        let outcome = session.logout().await;
        let _ = self.error.try_set(None);
        outcome
    }

    async fn run_form(
        &self,
        call: impl Future<Output = Result<User, AuthError>>,
    ) -> AuthOutcome {
        self.error.set(None);
        self.submitting.set(true);

        let result = call.await;
        // a newer action (usually logout) owns the screen now
        let superseded = matches!(result, Err(AuthError::Superseded));
        let outcome = AuthOutcome::from(result);

        // the form may have been unmounted while waiting
        let _ = self.submitting.try_set(false);
        if !outcome.success && !superseded {
            let _ = self.error.try_set(outcome.error.clone());
        }
        outcome
    }
}

/// Build the session, mirror it into signals and provide the context.
pub fn provide_auth_context() -> AuthContext {
    let ctx = AuthContext::new(
        AuthConfig::default(),
        Arc::new(StoreImpl::default()),
        Arc::new(ClientImpl::default()),
    );
    provide_context(ctx);

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        let session = ctx.session.get_value();
        leptos::task::spawn_local(async move {
            session.initialize().await;
        });
    });

    ctx
}

/// Get the authentication context
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
