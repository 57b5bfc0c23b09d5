//! Post prompt suggester: category + preferences in, one dismissible card out.

use leptos::prelude::*;
use prompts::HistoryKind;
use prompts::history::RecentQueries;
use time::OffsetDateTime;

use crate::components::prompt_card::PromptCard;
use crate::state::notifications::ToastState;
use crate::state::panel::{PanelState, PostPanel};

#[component]
pub fn PostSuggester() -> impl IntoView {
    let panel = expect_context::<RwSignal<PostPanel>>();
    let history = expect_context::<RwSignal<RecentQueries>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut submission = None;
        panel.update(|p| submission = p.submit());
        let Some((ticket, request)) = submission else {
            return;
        };
        history.update(|h| {
            h.add(HistoryKind::Post, request.category.clone(), OffsetDateTime::now_utc());
        });

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::suggest_post(&request).await;
            panel.update(|p| {
                toasts.update(|t| {
                    p.complete(ticket, result, t);
                });
            });
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ticket, request, toasts);
        }
    };

    let loading = move || panel.with(|p| p.results.is_loading());
    let category_error = move || panel.with(|p| p.errors.get("category"));
    let preferences_error = move || panel.with(|p| p.errors.get("preferences"));
    let dismiss = Callback::new(move |()| panel.update(PostPanel::dismiss));

    view! {
        <div class="generator">
            <section class="card generator__form">
                <header class="card__header">
                    <h3 class="card__title">"Suggest a Post"</h3>
                    <p class="card__description">"Stuck for ideas? Let the AI suggest a post prompt for you."</p>
                </header>
                <form class="form" on:submit=on_submit>
                    <label class="form__item">
                        <span class="form__label">"Category"</span>
                        <input
                            class="input"
                            class:input--invalid=move || category_error().is_some()
                            type="text"
                            placeholder="e.g., Tech, Travel, Food"
                            prop:value=move || panel.with(|p| p.form.category.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                panel.update(|p| p.form.category = value);
                            }
                        />
                        {move || category_error().map(|message| view! { <p class="form__message">{message}</p> })}
                    </label>
                    <label class="form__item">
                        <span class="form__label">"Preferences"</span>
                        <textarea
                            class="input textarea"
                            class:input--invalid=move || preferences_error().is_some()
                            rows="4"
                            placeholder="Describe the tone, length, and style you prefer.\ne.g., A short, witty post about a new gadget."
                            prop:value=move || panel.with(|p| p.form.preferences.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                panel.update(|p| p.form.preferences = value);
                            }
                        ></textarea>
                        {move || preferences_error().map(|message| view! { <p class="form__message">{message}</p> })}
                    </label>
                    <button class="btn btn--primary btn--block" type="submit" disabled=loading>
                        <span class="btn__icon" class:btn__icon--spin=loading></span>
                        "Suggest Post"
                    </button>
                </form>
            </section>

            <section class="generator__results">
                {move || match panel.with(|p| p.results.state().clone()) {
                    PanelState::Loading => {
                        view! {
                            <div class="placeholder">
                                <div class="spinner"></div>
                                <h3 class="placeholder__title">"Generating suggestion..."</h3>
                                <p class="placeholder__text">
                                    "The AI is thinking of a great post idea. Please wait."
                                </p>
                            </div>
                        }
                            .into_any()
                    }
                    PanelState::Success(prompt) => view! { <PromptCard text=prompt on_close=dismiss /> }.into_any(),
                    PanelState::Idle | PanelState::Failure(_) => {
                        view! {
                            <div class="placeholder">
                                <h3 class="placeholder__title">"Your post idea will appear here"</h3>
                                <p class="placeholder__text">"Fill out the form to get started!"</p>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </section>
        </div>
    }
}
