//! Clipboard helper with transient "copied" feedback.
//!
//! Writes through the async Clipboard API, then reports the outcome as a
//! toast. On success the copied flag stays up for [`COPIED_RESET`] so the
//! copy button can show a check mark.

use std::time::Duration;

use leptos::prelude::*;

use crate::state::notifications::ToastState;

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

pub const COPIED_RESET: Duration = Duration::from_secs(2);

pub const DEFAULT_COPY_MESSAGE: &str = "Copied to clipboard!";
pub const PROMPT_COPIED_MESSAGE: &str = "Prompt copied!";
pub const COPY_FAILED_TITLE: &str = "Copy Failed";
pub const COPY_FAILED_DESCRIPTION: &str = "Could not copy text to clipboard.";

/// Transient "copied" indicator for one copy button.
///
/// Each copy raises the flag under a new generation; a reset only lowers it
/// when no later copy has raised it since.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopiedFlag {
    generation: u64,
    shown: bool,
}

impl CopiedFlag {
    #[must_use]
    pub fn is_shown(self) -> bool {
        self.shown
    }

    /// Raise the flag. Returns the generation the matching reset must carry.
    pub fn raise(&mut self) -> u64 {
        self.generation += 1;
        self.shown = true;
        self.generation
    }

    /// Lower the flag unless a newer copy raised it. Returns whether it was lowered.
    pub fn reset(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.shown = false;
        true
    }
}

/// Record a finished clipboard write. Returns whether `copied` was raised.
pub fn apply_copy_result(result: Result<(), String>, success_message: &str, toasts: &mut ToastState) -> bool {
    match result {
        Ok(()) => {
            toasts.info(success_message);
            true
        }
        Err(e) => {
            leptos::logging::error!("Failed to copy text: {e}");
            toasts.error(COPY_FAILED_TITLE, COPY_FAILED_DESCRIPTION);
            false
        }
    }
}

/// Write `text` to the system clipboard.
///
/// # Errors
///
/// Returns the browser's rejection, or an error outside the browser.
pub async fn write_text(text: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        let promise = window.navigator().clipboard().write_text(text);
        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| format!("{e:?}"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = text;
        Err("clipboard not available on server".to_owned())
    }
}

/// Copy `text`, raising `copied` for [`COPIED_RESET`] on success.
///
/// Empty text is ignored.
pub fn copy(text: String, success_message: &'static str, copied: RwSignal<CopiedFlag>, toasts: RwSignal<ToastState>) {
    if text.is_empty() {
        return;
    }
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = write_text(&text).await;
        let mut raised = false;
        toasts.update(|t| raised = apply_copy_result(result, success_message, t));
        if raised {
            let mut generation = 0;
            copied.update(|c| generation = c.raise());
            gloo_timers::future::sleep(COPIED_RESET).await;
            copied.update(|c| {
                c.reset(generation);
            });
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (success_message, copied, toasts);
    }
}
