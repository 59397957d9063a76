use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::core::VerificationMode;
use crate::ui::pages::{
    DashboardPage, FEATURES, Feature, FeaturePage, LandingPage, LoginPage, NotFoundPage,
    RegisterPage,
};
use crate::ui::{ProtectedRoute, provide_auth_context};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

const HISTORY: Feature = Feature {
    path: "/historique",
    title: "History",
    summary: "Your past analyses and coaching sessions.",
};

fn feature(path: &str) -> Feature {
    FEATURES
        .iter()
        .copied()
        .find(|feature| feature.path == path)
        .unwrap_or(HISTORY)
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_auth_context();

    view! {
        <Title text="PayCoach"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("login")) view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("register")) view=RegisterPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                />
                <Route
                    path=StaticSegment("bulletin-paie")
                    view=|| view! {
                        <ProtectedRoute><FeaturePage feature=feature("/bulletin-paie")/></ProtectedRoute>
                    }
                />
                <Route
                    path=StaticSegment("analyse-salariale")
                    view=|| view! {
                        <ProtectedRoute><FeaturePage feature=feature("/analyse-salariale")/></ProtectedRoute>
                    }
                />
                <Route
                    path=StaticSegment("coaching-carriere")
                    view=|| view! {
                        <ProtectedRoute><FeaturePage feature=feature("/coaching-carriere")/></ProtectedRoute>
                    }
                />
                // read-only listing; a stored token is enough
                <Route
                    path=StaticSegment("historique")
                    view=|| view! {
                        <ProtectedRoute mode=VerificationMode::TokenPresenceOnly>
                            <FeaturePage feature=HISTORY/>
                        </ProtectedRoute>
                    }
                />
            </Routes>
        </Router>
    }
}
