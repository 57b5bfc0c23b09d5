//! Recent-queries sidebar: replay or clear past submissions.

use leptos::prelude::*;
use prompts::history::RecentQueries;

use crate::state::panel::{CaptionPanel, PostPanel};
use crate::state::ui::{UiState, select_history};

#[component]
pub fn HistorySidebar() -> impl IntoView {
    let history = expect_context::<RwSignal<RecentQueries>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let caption = expect_context::<RwSignal<CaptionPanel>>();
    let post = expect_context::<RwSignal<PostPanel>>();

    let items = move || history.with(|h| h.items().to_vec());
    let has_items = move || history.with(|h| !h.items().is_empty());

    view! {
        <aside class="sidebar" class:sidebar--open=move || ui.get().sidebar_open>
            <div class="sidebar__header">
                <span class="sidebar__logo" aria-hidden="true">"\u{2728}"</span>
                <h1 class="sidebar__title">"CaptionCraft AI"</h1>
            </div>
            <div class="sidebar__group">
                <div class="sidebar__group-label">
                    <span>"Recent"</span>
                    <Show when=has_items>
                        <button class="btn btn--ghost btn--sm" on:click=move |_| history.update(RecentQueries::clear)>
                            "Clear"
                        </button>
                    </Show>
                </div>
                <Show
                    when=has_items
                    fallback=|| view! { <p class="sidebar__empty">"No history yet."</p> }
                >
                    <ul class="sidebar__menu">
                        <For
                            each=items
                            key=|item| item.id.clone()
                            children=move |item| {
                                let id = item.id.clone();
                                let query = item.query.clone();
                                let title = query.clone();
                                let is_active = move || ui.with(|u| u.selected_history.as_deref() == Some(id.as_str()));
                                let on_select = move |_| {
                                    ui.update(|u| {
                                        caption.update(|c| post.update(|p| select_history(&item, u, c, p)));
                                    });
                                };
                                view! {
                                    <li>
                                        <button
                                            class="sidebar__item"
                                            class:sidebar__item--active=is_active
                                            title=title
                                            on:click=on_select
                                        >
                                            {query}
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </div>
        </aside>
    }
}
