//! Generator panel state: form values, field errors, and the result slot.
//!
//! DESIGN
//! ======
//! Every submission takes a ticket. Only the completion carrying the latest
//! ticket may write the result, so a slow reply can never overwrite a newer
//! one. Plain structs here; components wrap them in `RwSignal` contexts.

use prompts::{CaptionForm, CaptionRequest, FormErrors, PostForm, PostRequest};

use super::notifications::ToastState;

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

/// Identifies one submission of one panel.
pub type Ticket = u64;

/// Title of the toast raised when a generation request fails.
pub const GENERATION_FAILED_TITLE: &str = "Error";

/// Result slot for one request/response cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

/// Result slot plus the ticket of the latest submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultSlot<T> {
    state: PanelState<T>,
    latest: Ticket,
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self { state: PanelState::Idle, latest: 0 }
    }
}

impl<T> ResultSlot<T> {
    #[must_use]
    pub fn state(&self) -> &PanelState<T> {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, PanelState::Loading)
    }

    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match &self.state {
            PanelState::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Start a submission: clear prior results and issue a new ticket.
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.state = PanelState::Loading;
        self.latest
    }

    /// Apply a completion. Returns `false` when `ticket` is stale.
    pub fn finish(&mut self, ticket: Ticket, result: Result<T, String>) -> bool {
        if ticket != self.latest {
            return false;
        }
        self.state = match result {
            Ok(value) => PanelState::Success(value),
            Err(message) => PanelState::Failure(message),
        };
        true
    }

    /// Drop displayed results. An in-flight submission is left to land.
    pub fn clear(&mut self) {
        if !self.is_loading() {
            self.state = PanelState::Idle;
        }
    }
}

/// Land a finished request on `slot`. An applied failure raises a
/// destructive toast; a stale completion changes nothing.
///
/// Returns whether the completion was applied.
pub fn apply_completion<T>(
    slot: &mut ResultSlot<T>,
    ticket: Ticket,
    result: Result<T, String>,
    toasts: &mut ToastState,
) -> bool {
    let failure = result.as_ref().err().cloned();
    if !slot.finish(ticket, result) {
        return false;
    }
    if let Some(message) = failure {
        toasts.error(GENERATION_FAILED_TITLE, &message);
    }
    true
}

// =============================================================================
// CAPTION PANEL
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptionPanel {
    pub form: CaptionForm,
    pub errors: FormErrors,
    pub results: ResultSlot<Vec<String>>,
}

impl CaptionPanel {
    /// Validate the form and start a submission.
    ///
    /// Returns `None` when validation fails (errors are kept for display) or
    /// a submission is already in flight.
    pub fn submit(&mut self) -> Option<(Ticket, CaptionRequest)> {
        if self.results.is_loading() {
            return None;
        }
        match self.form.validate() {
            Ok(request) => {
                self.errors = FormErrors::default();
                Some((self.results.begin(), request))
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Apply a completion; see [`apply_completion`].
    pub fn complete(&mut self, ticket: Ticket, result: Result<Vec<String>, String>, toasts: &mut ToastState) -> bool {
        apply_completion(&mut self.results, ticket, result, toasts)
    }

    /// Pre-fill the topic from a history entry.
    pub fn select_query(&mut self, topic: &str) {
        self.form.topic = topic.to_owned();
        self.errors = FormErrors::default();
        self.results.clear();
    }
}

// =============================================================================
// POST PANEL
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostPanel {
    pub form: PostForm,
    pub errors: FormErrors,
    pub results: ResultSlot<String>,
}

impl PostPanel {
    /// Validate the form and start a submission.
    ///
    /// Returns `None` when validation fails or a submission is in flight.
    pub fn submit(&mut self) -> Option<(Ticket, PostRequest)> {
        if self.results.is_loading() {
            return None;
        }
        match self.form.validate() {
            Ok(request) => {
                self.errors = FormErrors::default();
                Some((self.results.begin(), request))
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn complete(&mut self, ticket: Ticket, result: Result<String, String>, toasts: &mut ToastState) -> bool {
        apply_completion(&mut self.results, ticket, result, toasts)
    }

    /// Close the suggestion card.
    pub fn dismiss(&mut self) {
        self.results.clear();
    }

    /// Pre-fill the category from a history entry; preferences start over.
    pub fn select_query(&mut self, category: &str) {
        self.form.category = category.to_owned();
        self.form.preferences.clear();
        self.errors = FormErrors::default();
        self.results.clear();
    }
}
