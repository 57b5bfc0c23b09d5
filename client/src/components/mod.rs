//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the generator panels and shell chrome while reading and
//! writing shared state from Leptos context providers.

pub mod caption_generator;
pub mod history_sidebar;
pub mod post_suggester;
pub mod prompt_card;
pub mod toaster;
