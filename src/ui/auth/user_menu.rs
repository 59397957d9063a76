//! User menu component
//!
//! Header widget: sign-in links for visitors, the user's name and a
//! logout button once the session is established.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;

/// User menu component for the header
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();
    let menu_open = RwSignal::new(false);

    let handle_logout = move |_| {
        menu_open.set(false);
        // guarded pages redirect on their own once the user is gone
        spawn_local(async move {
            auth.logout().await;
        });
    };

    view! {
        <div class="relative">
            {move || {
                if auth.is_loading() {
                    return view! {
                        <div class="w-8 h-8 rounded-full bg-gray-200 animate-pulse"></div>
                    }
                        .into_any();
                }
                match auth.user() {
                    None => {
                        view! {
                            <div class="flex items-center gap-2">
                                <A
                                    href="/auth/login"
                                    attr:class="px-3 py-1.5 text-sm font-medium text-gray-700 hover:text-gray-900"
                                >
                                    "Sign in"
                                </A>
                                <A
                                    href="/auth/register"
                                    attr:class="px-3 py-1.5 text-sm font-medium text-white bg-blue-600 hover:bg-blue-700 rounded-lg"
                                >
                                    "Sign up"
                                </A>
                            </div>
                        }
                            .into_any()
                    }
                    Some(user) => {
                        let name = user.display_name();
                        let initial = name.chars().next().unwrap_or('?').to_uppercase().to_string();
                        view! {
                            <button
                                type="button"
                                class="flex items-center gap-2 p-1 rounded-lg hover:bg-gray-100"
                                on:click=move |_| menu_open.update(|open| *open = !*open)
                            >
                                <span class="w-8 h-8 rounded-full bg-blue-600 text-white flex items-center justify-center text-sm font-medium">
                                    {initial}
                                </span>
                                <span class="hidden sm:block text-sm font-medium text-gray-900">
                                    {name}
                                </span>
                            </button>
                            <Show when=move || menu_open.get()>
                                <div class="absolute right-0 mt-2 w-48 bg-white border border-gray-200 rounded-lg shadow-lg py-1 z-50">
                                    <A
                                        href="/dashboard"
                                        attr:class="block px-4 py-2 text-sm text-gray-700 hover:bg-gray-100"
                                    >
                                        "Dashboard"
                                    </A>
                                    <button
                                        type="button"
                                        class="w-full text-left px-4 py-2 text-sm text-red-600 hover:bg-gray-100"
                                        on:click=handle_logout
                                    >
                                        "Sign out"
                                    </button>
                                </div>
                            </Show>
                        }
                            .into_any()
                    }
                }
            }}
        </div>
    }
}
