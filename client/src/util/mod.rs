//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (clipboard, `localStorage`) from
//! page and component logic so the logic stays testable off the browser.

pub mod clipboard;
pub mod storage;
