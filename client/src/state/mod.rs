//! Shared client state, provided to components as `RwSignal` contexts.
//!
//! ARCHITECTURE
//! ============
//! State types are plain structs with pure transition methods so they can
//! be unit tested without a reactive runtime.

pub mod notifications;
pub mod panel;
pub mod ui;
