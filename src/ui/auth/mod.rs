//! Authentication UI module
//!
//! Context, route guards and forms that put the session core on screen.

mod context;
mod guard;
mod login_form;
mod register_form;
mod user_menu;
mod validation;

pub use context::{AppSession, AuthContext, provide_auth_context, use_auth_context};
pub use guard::{AuthGuard, ProtectedRoute};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
pub use user_menu::UserMenu;
