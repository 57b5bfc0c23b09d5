//! One generated snippet with a copy button and an optional close button.

use leptos::prelude::*;

use crate::state::notifications::ToastState;
use crate::util::clipboard::{self, CopiedFlag, PROMPT_COPIED_MESSAGE};

#[component]
pub fn PromptCard(#[prop(into)] text: String, #[prop(optional)] on_close: Option<Callback<()>>) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let copied = RwSignal::new(CopiedFlag::default());

    let copy_text = text.clone();
    let on_copy = move |_| clipboard::copy(copy_text.clone(), PROMPT_COPIED_MESSAGE, copied, toasts);

    view! {
        <div class="prompt-card">
            <p class="prompt-card__text">{text}</p>
            <button
                class="btn btn--ghost prompt-card__copy"
                class:prompt-card__copy--done=move || copied.get().is_shown()
                aria-label="Copy prompt"
                on:click=on_copy
            >
                {move || if copied.get().is_shown() { "\u{2713}" } else { "Copy" }}
            </button>
            {on_close
                .map(|close| {
                    view! {
                        <button
                            class="btn btn--ghost prompt-card__close"
                            aria-label="Dismiss prompt"
                            on:click=move |_| close.run(())
                        >
                            "\u{00d7}"
                        </button>
                    }
                })}
        </div>
    }
}
