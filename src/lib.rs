//! # tripdeck
//!
//! Multi-role travel-booking web client: customers browse and book travel
//! services, providers manage listings, admins manage users. Authentication,
//! the document store, and file storage are a hosted third-party platform;
//! this crate is the rendering and form-handling layer over its REST API.
//!
//! The crate builds for the browser with the `csr` feature (WASM, mounted by
//! [`start`]) and on the host without it, where the in-memory platform backs
//! the unit tests.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: set up logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(crate::app::App);
}
