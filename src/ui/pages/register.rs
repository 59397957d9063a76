//! Register page component

use leptos::prelude::*;

use super::layout::AppHeader;
use super::login::{redirect_when_signed_in, use_return_path};
use crate::ui::auth::{RegisterForm, use_auth_context};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth_context();
    let return_to = use_return_path(auth);
    redirect_when_signed_in(auth, return_to);

    view! {
        <div class="min-h-screen bg-gray-50 flex flex-col">
            <AppHeader />
            <main class="flex-1 flex items-center justify-center p-4">
                <div class="w-full max-w-lg bg-white rounded-xl shadow-lg p-6 border border-gray-200">
                    <RegisterForm />
                </div>
            </main>
        </div>
    }
}
