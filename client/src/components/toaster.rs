//! Toast stack rendered in the corner of the viewport.

use leptos::prelude::*;

use crate::state::notifications::{Toast, ToastState, ToastVariant};

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toaster" role="status" aria-live="polite">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    #[cfg(feature = "hydrate")]
                    leptos::task::spawn_local(async move {
                        gloo_timers::future::sleep(crate::state::notifications::TOAST_DURATION).await;
                        toasts.update(|t| t.dismiss(id));
                    });
                    let destructive = toast.variant == ToastVariant::Destructive;
                    view! {
                        <div class="toast" class:toast--destructive=destructive>
                            <div class="toast__body">
                                {toast.title.map(|title| view! { <p class="toast__title">{title}</p> })}
                                {toast
                                    .description
                                    .map(|description| view! { <p class="toast__description">{description}</p> })}
                            </div>
                            <button
                                class="btn btn--ghost toast__close"
                                aria-label="Dismiss notification"
                                on:click=move |_| toasts.update(|t| t.dismiss(id))
                            >
                                "\u{00d7}"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
