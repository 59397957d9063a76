//! Registration form component
//!
//! Collects the full profile the backend expects. Every field is
//! required and the password must be confirmed before anything is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use super::validation::{
    validate_confirmation, validate_email, validate_new_password, validate_required,
};
use crate::core::RegisterRequest;
use crate::ui::common::InlineSpinner;

/// A labelled text input bound to a signal, with its own error line.
#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "off")] autocomplete: &'static str,
    value: RwSignal<String>,
    error: RwSignal<Option<String>>,
    #[prop(into)] on_blur: Callback<()>,
) -> impl IntoView {
    view! {
        <div>
            <label for=id class="block text-sm font-medium text-gray-900 mb-1">
                {label}
            </label>
            <input
                type=input_type
                id=id
                name=id
                autocomplete=autocomplete
                class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                class:border-red-500=move || error.get().is_some()
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    error.set(None);
                }
                on:blur=move |_| on_blur.run(())
            />
            {move || {
                error.get().map(|message| {
                    view! { <p class="mt-1 text-sm text-red-500">{message}</p> }
                })
            }}
        </div>
    }
}

/// Register form component
#[component]
pub fn RegisterForm(
    /// Callback when registration is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
    /// Where the "sign in" link points
    #[prop(default = "/auth/login".to_string(), into)]
    login_href: String,
) -> impl IntoView {
    let auth = use_auth_context();

    let email = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());

    let email_error = RwSignal::new(None::<String>);
    let username_error = RwSignal::new(None::<String>);
    let first_name_error = RwSignal::new(None::<String>);
    let last_name_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let confirm_error = RwSignal::new(None::<String>);

    // Stores the check's error and reports whether the field passed
    let check = move |error: RwSignal<Option<String>>, result: Result<(), String>| {
        error.set(result.err());
        error.with(Option::is_none)
    };

    let check_email = move || check(email_error, email.with(|v| validate_email(v)));
    let check_username = move || {
        check(
            username_error,
            username.with(|v| validate_required("Username", v)),
        )
    };
    let check_first_name = move || {
        check(
            first_name_error,
            first_name.with(|v| validate_required("First name", v)),
        )
    };
    let check_last_name = move || {
        check(
            last_name_error,
            last_name.with(|v| validate_required("Last name", v)),
        )
    };
    let check_password = move || check(password_error, password.with(|v| validate_new_password(v)));
    let check_confirm = move || {
        let result = password.with(|p| confirm.with(|c| validate_confirmation(p, c)));
        check(confirm_error, result)
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        // run every check so all messages show at once
        let results = [
            check_email(),
            check_username(),
            check_first_name(),
            check_last_name(),
            check_password(),
            check_confirm(),
        ];
        if results.contains(&false) || auth.submitting.get_untracked() {
            return;
        }

        let profile = RegisterRequest {
            email: email.get_untracked().trim().to_string(),
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
            role: RegisterRequest::DEFAULT_ROLE.to_string(),
        };

        spawn_local(async move {
            let outcome = auth.register(profile).await;
            if outcome.success {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-5" novalidate=true>
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">"Create your account"</h2>
                <p class="mt-2 text-sm text-gray-600">
                    "Analyse your payslips and get personalised career advice"
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

            <div class="grid grid-cols-2 gap-4">
                <Field
                    id="first_name"
                    label="First name"
                    autocomplete="given-name"
                    value=first_name
                    error=first_name_error
                    on_blur=move |_| { check_first_name(); }
                />
                <Field
                    id="last_name"
                    label="Last name"
                    autocomplete="family-name"
                    value=last_name
                    error=last_name_error
                    on_blur=move |_| { check_last_name(); }
                />
            </div>
            <Field
                id="email"
                label="Email"
                input_type="email"
                autocomplete="email"
                value=email
                error=email_error
                on_blur=move |_| { check_email(); }
            />
            <Field
                id="username"
                label="Username"
                autocomplete="username"
                value=username
                error=username_error
                on_blur=move |_| { check_username(); }
            />
            <Field
                id="password"
                label="Password"
                input_type="password"
                autocomplete="new-password"
                value=password
                error=password_error
                on_blur=move |_| { check_password(); }
            />
            <Field
                id="confirm_password"
                label="Confirm password"
                input_type="password"
                autocomplete="new-password"
                value=confirm
                error=confirm_error
                on_blur=move |_| { check_confirm(); }
            />

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
                                "Creating account..."
                            </span>
                        }
                            .into_any()
                    } else {
                        view! { <span class="block">"Create account"</span> }.into_any()
                    }
                }}
            </button>

            <div class="text-center text-sm text-gray-600">
                "Already have an account? "
                <A href=login_href attr:class="text-blue-600 hover:text-blue-700 font-medium">
                    "Sign in"
                </A>
            </div>
        </form>
    }
}
