//! PayCoach - payslip analysis, salary benchmarks and career coaching
//!
//! The `core` module holds the authentication and session-guard logic;
//! `ui` binds it to Leptos components.

#![recursion_limit = "512"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
