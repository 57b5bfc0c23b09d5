//! Caption prompt generator: form on the left, prompt cards on the right.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads and writes `CaptionPanel` from context. A valid submission is
//! recorded in history before the request goes out; a failed request shows
//! a destructive toast and leaves the result area empty.

use leptos::prelude::*;
use prompts::HistoryKind;
use prompts::forms::{LENGTH_OPTIONS, STYLE_OPTIONS, TONE_OPTIONS};
use prompts::history::RecentQueries;
use time::OffsetDateTime;

use crate::components::prompt_card::PromptCard;
use crate::state::notifications::ToastState;
use crate::state::panel::{CaptionPanel, PanelState};

#[component]
pub fn CaptionGenerator() -> impl IntoView {
    let panel = expect_context::<RwSignal<CaptionPanel>>();
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
            h.add(HistoryKind::Caption, request.topic.clone(), OffsetDateTime::now_utc());
        });

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::generate_captions(&request).await;
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
    let topic_error = move || panel.with(|p| p.errors.get("topic"));

    view! {
        <div class="generator">
            <section class="card generator__form">
                <header class="card__header">
                    <h3 class="card__title">"Customize Prompt"</h3>
                    <p class="card__description">
                        "Tailor the AI to generate the perfect caption prompts for your needs."
                    </p>
                </header>
                <form class="form" on:submit=on_submit>
                    <label class="form__item">
                        <span class="form__label">"Topic or Theme"</span>
                        <input
                            class="input"
                            class:input--invalid=move || topic_error().is_some()
                            type="text"
                            placeholder="e.g., Summer vacation photos"
                            prop:value=move || panel.with(|p| p.form.topic.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                panel.update(|p| p.form.topic = value);
                            }
                        />
                        {move || topic_error().map(|message| view! { <p class="form__message">{message}</p> })}
                    </label>
                    <SelectField
                        label="Tone"
                        options=TONE_OPTIONS
                        value=Signal::derive(move || panel.with(|p| p.form.tone.clone()))
                        on_change=Callback::new(move |value: String| panel.update(|p| p.form.tone = value))
                    />
                    <SelectField
                        label="Length"
                        options=LENGTH_OPTIONS
                        value=Signal::derive(move || panel.with(|p| p.form.length.clone()))
                        on_change=Callback::new(move |value: String| panel.update(|p| p.form.length = value))
                    />
                    <SelectField
                        label="Style"
                        options=STYLE_OPTIONS
                        value=Signal::derive(move || panel.with(|p| p.form.style.clone()))
                        on_change=Callback::new(move |value: String| panel.update(|p| p.form.style = value))
                    />
                    <button class="btn btn--primary btn--block" type="submit" disabled=loading>
                        <span class="btn__icon" class:btn__icon--spin=loading></span>
                        "Generate Prompts"
                    </button>
                </form>
            </section>

            <section class="generator__results">
                {move || match panel.with(|p| p.results.state().clone()) {
                    PanelState::Loading => {
                        view! {
                            <div class="placeholder">
                                <div class="spinner"></div>
                                <h3 class="placeholder__title">"Generating prompts..."</h3>
                                <p class="placeholder__text">
                                    "The AI is crafting some ideas for you. Please wait."
                                </p>
                            </div>
                        }
                            .into_any()
                    }
                    PanelState::Success(items) if !items.is_empty() => {
                        view! {
                            <div class="generator__cards">
                                {items
                                    .into_iter()
                                    .map(|prompt| view! { <PromptCard text=prompt /> })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                    _ => {
                        view! {
                            <div class="placeholder">
                                <h3 class="placeholder__title">"Your prompts will appear here"</h3>
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

/// Labelled `<select>` bound to one form field.
#[component]
fn SelectField(
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
    value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="form__item">
            <span class="form__label">{label}</span>
            <select
                class="input select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {options
                    .iter()
                    .map(|(option, text)| {
                        view! {
                            <option value=*option selected=move || value.get() == *option>
                                {*text}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}
