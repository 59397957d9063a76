//! Login form component
//!
//! Email and password sign-in. Server errors come back through the auth
//! context; field errors are shown inline.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use super::validation::{validate_email, validate_login_password};
use crate::ui::common::InlineSpinner;

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
    /// Where the "create an account" link points
    #[prop(default = "/auth/register".to_string(), into)]
    register_href: String,
) -> impl IntoView {
    let auth = use_auth_context();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let check_email = move || {
        let result = email.with(|value| validate_email(value));
        email_error.set(result.err());
        email_error.with(Option::is_none)
    };

    let check_password = move || {
        let result = password.with(|value| validate_login_password(value));
        password_error.set(result.err());
        password_error.with(Option::is_none)
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        let email_valid = check_email();
        let password_valid = check_password();
        if !email_valid || !password_valid || auth.submitting.get_untracked() {
            return;
        }

        let email_val = email.get_untracked().trim().to_string();
        let password_val = password.get_untracked();

        spawn_local(async move {
            let outcome = auth.login(email_val, password_val).await;
            if outcome.success {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-6" novalidate=true>
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">"Sign in"</h2>
                <p class="mt-2 text-sm text-gray-600">
                    "Access your payslips and career coaching"
                </p>
            </div>

            {move || {
                auth.error.get().map(|error| {
                    view! {
                        <div class="p-3 bg-red-50 border border-red-300 rounded-lg" role="alert">
                            <p class="text-sm text-red-700">{error}</p>
                        </div>
                    }
                })
            }}

            <div>
                <label for="email" class="block text-sm font-medium text-gray-900 mb-1">
                    "Email"
                </label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                    class:border-red-500=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                    on:blur=move |_| { check_email(); }
                />
                {move || {
                    email_error.get().map(|error| {
                        view! { <p class="mt-1 text-sm text-red-500">{error}</p> }
                    })
                }}
            </div>

            <div>
                <label for="password" class="block text-sm font-medium text-gray-900 mb-1">
                    "Password"
                </label>
                <div class="relative">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        id="password"
                        name="password"
                        autocomplete="current-password"
                        class="w-full px-3 py-2 pr-16 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                        class:border-red-500=move || password_error.get().is_some()
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            password_error.set(None);
                        }
                        on:blur=move |_| { check_password(); }
                    />
                    <button
                        type="button"
                        class="absolute inset-y-0 right-0 pr-3 text-xs text-gray-500 hover:text-gray-700"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                {move || {
                    password_error.get().map(|error| {
                        view! { <p class="mt-1 text-sm text-red-500">{error}</p> }
                    })
                }}
            </div>

            <button
                type="submit"
                class="w-full py-2.5 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                disabled=move || auth.submitting.get()
            >
                {move || {
                    if auth.submitting.get() {
                        view! {
                            <span class="flex items-center justify-center gap-2">
                                <InlineSpinner />
                                "Signing in..."
                            </span>
                        }
                            .into_any()
                    } else {
                        view! { <span class="block">"Sign in"</span> }.into_any()
                    }
                }}
            </button>

            <div class="text-center text-sm text-gray-600">
                "Don't have an account? "
                <A href=register_href attr:class="text-blue-600 hover:text-blue-700 font-medium">
                    "Create an account"
                </A>
            </div>
        </form>
    }
}
