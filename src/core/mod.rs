//! Authentication and session-guard core
//!
//! Framework-agnostic pieces: token storage, session verification, the
//! session state machine and the route guard. The Leptos layer in `ui`
//! binds them to signals.

mod api;
pub mod config;
mod error;
pub mod guard;
pub mod http;
mod models;
#[cfg(feature = "ssr")]
pub mod proxy;
pub mod routes;
mod session;
mod token_store;
mod verifier;

#[cfg(test)]
mod testing;

pub use api::AuthApi;
pub use config::{AuthConfig, REDIRECT_PARAM, TOKEN_STORAGE_KEY};
pub use error::AuthError;
pub use guard::{
    GuardDecision, GuardInput, RouteGuard, VerificationMode, login_redirect_url, safe_return_path,
};
pub use http::{ApiRequest, ApiResponse, HttpClient, TransportError};
pub use models::{AuthGrant, AuthOutcome, LoginRequest, RegisterRequest, User, UserId};
pub use routes::{RouteClass, RoutePolicy};
pub use session::{AuthSession, SessionPhase, SessionState};
#[cfg(feature = "hydrate")]
pub use token_store::BrowserTokenStore;
pub use token_store::{MemoryTokenStore, TokenStore};
pub use verifier::SessionVerifier;
