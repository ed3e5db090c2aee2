//! # client
//!
//! Leptos + WASM frontend for the BenchCraft admin console.
//!
//! This crate contains pages, components, application state, REST types, and
//! the API client. State types and validators are plain Rust and test natively;
//! browser-only code sits behind the `hydrate` feature and the server links
//! the same app with `ssr`.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: mount the app over the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger already set: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
