//! # client
//!
//! Leptos + WASM frontend for the SehatNama medical records app.
//!
//! This crate contains pages, the protected-route wrapper, the Leptos mirror
//! of the session store, and the browser adapters (HTTP backend,
//! `localStorage`, `window.location`) the `session` crate is wired to.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
