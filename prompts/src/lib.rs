//! Shared prompt-generation domain for `server`, `client`, and `cli`.
//!
//! This crate owns everything that more than one side of the wire needs to
//! agree on: the two generation flows and their templates, the form
//! validation rules, the action result shape returned over HTTP, and the
//! capped recent-queries history with its persistence interface.

pub mod actions;
pub mod flows;
pub mod forms;
pub mod history;

pub use actions::ActionResult;
pub use flows::{CaptionOutput, CaptionRequest, Flow, GenerateCaptionPrompts, PostOutput, PostRequest, SuggestPostPrompts};
pub use forms::{CaptionForm, FieldError, FormErrors, PostForm};
pub use history::{History, HistoryItem, HistoryKind, HistoryStore, HistoryStoreError, RecentQueries};
