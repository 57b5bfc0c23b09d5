//! Network layer for the generation actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to the server only through the two action endpoints;
//! everything here returns user-facing messages on failure.

pub mod api;
