pub mod auth;
pub mod common;
pub mod pages;

pub use auth::{AuthGuard, ProtectedRoute, provide_auth_context, use_auth_context};
