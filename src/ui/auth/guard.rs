//! Route guard components
//!
//! [`AuthGuard`] holds one [`RouteGuard`] per mount, feeds it the current
//! session (or token) state and performs the navigation it asks for.
//! [`ProtectedRoute`] consults the route policy first and only guards
//! paths that need it.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use super::context::use_auth_context;
use crate::core::{GuardDecision, RouteGuard, RoutePolicy, VerificationMode};
use crate::ui::common::LoadingSpinner;

/// Render `children` only for an authenticated visitor.
#[component]
pub fn AuthGuard(
    children: ChildrenFn,
    /// How authentication is established for this subtree
    #[prop(optional)]
    mode: VerificationMode,
    /// Shown while redirecting, instead of nothing
    #[prop(optional, into)]
    fallback: Option<ViewFn>,
    /// Login page to send visitors to; defaults to the configured one
    #[prop(optional, into)]
    login_path: Option<String>,
) -> impl IntoView {
    let auth = use_auth_context();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let login_path = login_path.unwrap_or_else(|| auth.login_page());
    let guard = StoredValue::new(RouteGuard::new(login_path));

    // Effects only run in the browser, where the token store is readable.
    let mounted = RwSignal::new(false);
    Effect::new(move |_| mounted.set(true));

    // Re-evaluated on every session transition, so a logout re-reads the token.
    let input = Memo::new(move |_| auth.guard_input(mode, mounted.get()));

    let decision = Memo::new(move |_| {
        let input = input.get();
        let path = pathname.get_untracked();
        guard
            .try_update_value(|guard| guard.evaluate(input, &path))
            .unwrap_or(GuardDecision::Loading)
    });

    Effect::new(move |_| {
        if let GuardDecision::Redirect(target) = decision.get() {
            tracing::debug!(%target, "redirecting unauthenticated visitor");
            navigate(
                &target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    let fallback = StoredValue::new(fallback);

    move || match decision.get() {
        GuardDecision::Loading => {
            view! { <LoadingSpinner message="Checking your session...".to_string() /> }.into_any()
        }
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect(_) | GuardDecision::Fallback => fallback
            .with_value(|fallback| fallback.as_ref().map(ViewFn::run))
            .unwrap_or_else(|| ().into_any()),
    }
}

/// Guard `children` when the current path is protected by the route policy.
#[component]
pub fn ProtectedRoute(
    children: ChildrenFn,
    #[prop(optional)] mode: VerificationMode,
) -> impl IntoView {
    let path = use_location().pathname.get_untracked();

    if RoutePolicy::default().requires_auth(&path) {
        view! { <AuthGuard mode=mode>{children()}</AuthGuard> }.into_any()
    } else {
        children().into_any()
    }
}
