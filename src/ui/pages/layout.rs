//! Header and navigation shared by every page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::{UserMenu, use_auth_context};

/// One of the member-only tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub path: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        path: "/bulletin-paie",
        title: "Payslip analysis",
        summary: "Upload a payslip and get every line explained.",
    },
    Feature {
        path: "/analyse-salariale",
        title: "Salary benchmark",
        summary: "Compare your pay with the market for your role and region.",
    },
    Feature {
        path: "/coaching-carriere",
        title: "Career coaching",
        summary: "Personalised advice for your next raise or move.",
    },
];

#[component]
pub fn AppHeader() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        <header class="border-b border-gray-200 bg-white">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center justify-between h-16">
                    <A href="/" attr:class="flex items-center gap-2 hover:opacity-80 transition-opacity">
                        <span class="w-8 h-8 bg-blue-600 rounded-lg text-white font-bold flex items-center justify-center">
                            "P"
                        </span>
                        <span class="text-xl font-bold text-gray-900">"PayCoach"</span>
                    </A>

                    <nav class="hidden md:flex items-center gap-6">
                        <Show when=move || auth.is_logged_in()>
                            {FEATURES
                                .iter()
                                .map(|feature| {
                                    view! {
                                        <A
                                            href=feature.path
                                            attr:class="text-sm font-medium text-gray-600 hover:text-gray-900"
                                        >
                                            {feature.title}
                                        </A>
                                    }
                                })
                                .collect_view()}
                        </Show>
                    </nav>

                    <UserMenu />
                </div>
            </div>
        </header>
    }
}
