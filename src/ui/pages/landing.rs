//! Landing page component
//!
//! Public entry point presenting the three tools.

use leptos::prelude::*;
use leptos_meta::{Meta, Title};
use leptos_router::components::A;

use super::layout::{AppHeader, FEATURES};
use crate::ui::auth::use_auth_context;

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth_context();

    // members go straight to their dashboard
    let start_href = move || {
        if auth.is_logged_in() {
            "/dashboard".to_string()
        } else {
            "/auth/register".to_string()
        }
    };

    view! {
        <Title text="PayCoach - Understand your pay" />
        <Meta
            name="description"
            content="Payslip analysis, salary benchmarks and career coaching in one place."
        />

        <div class="min-h-screen bg-gray-50">
            <AppHeader />

            <section class="py-24 px-4 text-center">
                <h1 class="text-5xl font-bold text-gray-900 mb-6 tracking-tight">
                    "Understand your pay. Plan your next step."
                </h1>
                <p class="text-xl text-gray-600 max-w-2xl mx-auto mb-10">
                    "Decode your payslip, see how your salary compares and get coaching for your career."
                </p>
                <A
                    href=start_href
                    attr:class="inline-block px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg transition-colors"
                >
                    "Get started"
                </A>
            </section>

            <section class="pb-24 px-4">
                <div class="max-w-6xl mx-auto grid md:grid-cols-3 gap-8">
                    {FEATURES
                        .iter()
                        .map(|feature| {
                            view! {
                                <div class="p-6 bg-white rounded-xl border border-gray-200">
                                    <h3 class="text-lg font-semibold text-gray-900 mb-2">
                                        {feature.title}
                                    </h3>
                                    <p class="text-gray-600">{feature.summary}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>
        </div>
    }
}
