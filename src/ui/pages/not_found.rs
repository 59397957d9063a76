//! Not found page component

use leptos::prelude::*;
use leptos_router::components::A;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50 flex flex-col items-center justify-center p-4">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-gray-900 mb-4">"404"</h1>
                <h2 class="text-2xl font-semibold text-gray-900 mb-2">"Page Not Found"</h2>
                <p class="text-gray-600 mb-8 max-w-md mx-auto">
                    "The page you're looking for doesn't exist or has been moved."
                </p>
                <div class="flex flex-col sm:flex-row items-center justify-center gap-4">
                    <A
                        href="/"
                        attr:class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg transition-colors"
                    >
                        "Go Home"
                    </A>
                    <A
                        href="/dashboard"
                        attr:class="px-6 py-3 border border-gray-300 text-gray-900 hover:bg-gray-100 font-medium rounded-lg transition-colors"
                    >
                        "My Dashboard"
                    </A>
                </div>
            </div>
        </div>
    }
}
