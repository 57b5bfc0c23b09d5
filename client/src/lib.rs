//! # client
//!
//! Leptos + WASM frontend for CaptionCraft.
//!
//! This crate contains the page, components, panel state, the action API
//! helpers, and the browser glue (clipboard, `localStorage`). It renders on
//! the server via the `ssr` feature and hydrates in the browser via
//! `hydrate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
