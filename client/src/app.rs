//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use session::Role;

use crate::components::protected_route::ProtectedRoute;
use crate::config::ApiConfig;
use crate::pages::{
    dashboard::DashboardPage, home::HomePage, login::LoginPage, patient_portal::PatientPortalPage,
    register::RegisterPage,
};
use crate::state::auth::provide_auth;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the API config and auth contexts, restores the persisted session
/// once mounted in the browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ApiConfig::from_build_env();
    provide_context(config.clone());
    let auth = provide_auth(&config);

    // Effects only run after hydration, so SSR always renders the
    // unrestored (loading) session.
    let store = auth.store.clone();
    Effect::new(move || store.restore());

    view! {
        <Stylesheet id="leptos" href="/pkg/sehatnama.css"/>
        <Title text="SehatNama"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("login")) view=|| view! { <Redirect path="/login"/> }/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| {
                        view! {
                            <ProtectedRoute allowed_roles=vec![Role::Doctor, Role::Admin]>
                                <DashboardPage/>
                            </ProtectedRoute>
                        }
                    }
                />
                <Route
                    path=StaticSegment("patient-portal")
                    view=|| {
                        view! {
                            <ProtectedRoute allowed_roles=vec![Role::Patient]>
                                <PatientPortalPage/>
                            </ProtectedRoute>
                        }
                    }
                />
                <Route
                    path=(StaticSegment("patient-portal"), ParamSegment("id"))
                    view=|| {
                        view! {
                            <ProtectedRoute allowed_roles=vec![Role::Patient]>
                                <PatientPortalPage/>
                            </ProtectedRoute>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}
