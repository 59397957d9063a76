//! Member dashboard and tool pages
//!
//! Only reachable through the route guard, so a user is always present
//! while these render.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use super::layout::{AppHeader, FEATURES, Feature};
use crate::ui::auth::use_auth_context;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth_context();
    let greeting = move || {
        auth.user()
            .map(|user| format!("Welcome back, {}", user.display_name()))
            .unwrap_or_default()
    };

    view! {
        <Title text="Dashboard - PayCoach" />
        <div class="min-h-screen bg-gray-50">
            <AppHeader />
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-10">
                <h1 class="text-3xl font-bold text-gray-900 mb-8">{greeting}</h1>
                <div class="grid md:grid-cols-3 gap-6">
                    {FEATURES
                        .iter()
                        .map(|feature| {
                            view! {
                                <A
                                    href=feature.path
                                    attr:class="block p-6 bg-white rounded-xl border border-gray-200 hover:border-blue-400 transition-colors"
                                >
                                    <h2 class="text-lg font-semibold text-gray-900 mb-2">
                                        {feature.title}
                                    </h2>
                                    <p class="text-gray-600">{feature.summary}</p>
                                </A>
                            }
                        })
                        .collect_view()}
                </div>
            </main>
        </div>
    }
}

/// Placeholder body for one of the member tools
#[component]
pub fn FeaturePage(feature: Feature) -> impl IntoView {
    view! {
        <Title text=format!("{} - PayCoach", feature.title) />
        <div class="min-h-screen bg-gray-50">
            <AppHeader />
            <main class="max-w-4xl mx-auto px-4 py-10">
                <h1 class="text-3xl font-bold text-gray-900 mb-4">{feature.title}</h1>
                <p class="text-gray-600 mb-8">{feature.summary}</p>
                <A href="/dashboard" attr:class="text-blue-600 hover:text-blue-700 font-medium">
                    "Back to dashboard"
                </A>
            </main>
        </div>
    }
}
