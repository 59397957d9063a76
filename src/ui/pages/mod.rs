//! Application pages module
//!
//! - Landing page (public)
//! - Login and register pages
//! - Dashboard and the three member tools (guarded)
//! - Not found page

mod dashboard;
mod landing;
mod layout;
mod login;
mod not_found;
mod register;

pub use dashboard::{DashboardPage, FeaturePage};
pub use landing::LandingPage;
pub use layout::{AppHeader, FEATURES, Feature};
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
