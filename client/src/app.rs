//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use prompts::history::{MemoryHistoryStore, RecentQueries};

use crate::components::toaster::Toaster;
use crate::pages::home::HomePage;
use crate::state::{
    notifications::ToastState,
    panel::{CaptionPanel, PostPanel},
    ui::UiState,
};

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
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // History starts empty so SSR and hydration agree; the browser copy is
    // loaded once mounted.
    let history = RwSignal::new(RecentQueries::open(Arc::new(MemoryHistoryStore::default())));
    let ui = RwSignal::new(UiState::default());
    let caption = RwSignal::new(CaptionPanel::default());
    let post = RwSignal::new(PostPanel::default());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(history);
    provide_context(ui);
    provide_context(caption);
    provide_context(post);
    provide_context(toasts);

    Effect::new(move || {
        history.set(crate::util::storage::open_history());
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/captioncraft.css"/>
        <Title text="CaptionCraft AI"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
        <Toaster/>
    }
}
