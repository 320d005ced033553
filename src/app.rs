mod dock;
mod welcome;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use dock::Dock;
use welcome::Welcome;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio.css" />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <Title formatter=|title| format!("Parth - {title}") />

        <Router>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=Desktop />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn Desktop() -> impl IntoView {
    view! {
        <Title text="Portfolio" />
        <Welcome />
        <Dock />
    }
}
