//! Home page: history sidebar plus the two generator tabs.

use leptos::prelude::*;

use crate::components::caption_generator::CaptionGenerator;
use crate::components::history_sidebar::HistorySidebar;
use crate::components::post_suggester::PostSuggester;
use crate::state::ui::{ActiveTab, UiState};

#[component]
pub fn HomePage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let is_tab = move |tab: ActiveTab| ui.with(|u| u.active_tab == tab);
    let set_tab = move |tab: ActiveTab| ui.update(|u| u.active_tab = tab);

    view! {
        <div class="layout">
            <HistorySidebar />
            <div class="layout__inset">
                <header class="topbar">
                    <button
                        class="btn btn--ghost topbar__menu"
                        aria-label="Toggle sidebar"
                        on:click=move |_| ui.update(|u| u.sidebar_open = !u.sidebar_open)
                    >
                        "\u{2630}"
                    </button>
                    <h2 class="topbar__title">"Prompt Generators"</h2>
                </header>
                <main class="main">
                    <div class="tabs" role="tablist">
                        <button
                            class="tabs__trigger"
                            role="tab"
                            class:tabs__trigger--active=move || is_tab(ActiveTab::Caption)
                            aria-selected=move || is_tab(ActiveTab::Caption).to_string()
                            on:click=move |_| set_tab(ActiveTab::Caption)
                        >
                            "Caption Prompts"
                        </button>
                        <button
                            class="tabs__trigger"
                            role="tab"
                            class:tabs__trigger--active=move || is_tab(ActiveTab::Post)
                            aria-selected=move || is_tab(ActiveTab::Post).to_string()
                            on:click=move |_| set_tab(ActiveTab::Post)
                        >
                            "Post Prompts"
                        </button>
                    </div>
                    <hr class="separator" />
                    <Show when=move || is_tab(ActiveTab::Caption) fallback=|| view! { <PostSuggester /> }>
                        <CaptionGenerator />
                    </Show>
                </main>
            </div>
        </div>
    }
}
