//! Login page component
//!
//! Standalone sign-in page. Honours `?redirect=` so visitors bounced off a
//! protected page land back on it once signed in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use super::layout::AppHeader;
use crate::core::{REDIRECT_PARAM, login_redirect_url, safe_return_path};
use crate::ui::auth::{AuthContext, LoginForm, use_auth_context};

/// Where to go after signing in: the `redirect` query value when it is a
/// same-site path, the configured home page otherwise.
pub(super) fn use_return_path(auth: AuthContext) -> Memo<String> {
    let query = use_query_map();
    Memo::new(move |_| {
        let home = auth.home_page();
        query.with(|params| safe_return_path(params.get(REDIRECT_PARAM).as_deref(), &home))
    })
}

/// Leave the page for `return_to` as soon as a user is signed in.
pub(super) fn redirect_when_signed_in(auth: AuthContext, return_to: Memo<String>) {
    let navigate = use_navigate();
    Effect::new(move |_| {
        if auth.is_logged_in() {
            navigate(
                &return_to.get_untracked(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let return_to = use_return_path(auth);
    redirect_when_signed_in(auth, return_to);

    // carry the return path over if the visitor switches to sign-up
    let register_href = return_to.with_untracked(|path| {
        if *path == auth.home_page() {
            "/auth/register".to_string()
        } else {
            login_redirect_url("/auth/register", path)
        }
    });

    view! {
        <div class="min-h-screen bg-gray-50 flex flex-col">
            <AppHeader />
            <main class="flex-1 flex items-center justify-center p-4">
                <div class="w-full max-w-md bg-white rounded-xl shadow-lg p-6 border border-gray-200">
                    <LoginForm register_href=register_href />
                </div>
            </main>
        </div>
    }
}
