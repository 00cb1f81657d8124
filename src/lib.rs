pub mod api {
    pub mod brands;
    pub mod catalog;
    pub mod errors;
    pub mod pages;
    #[cfg(feature = "ssr")]
    pub mod routes;
    pub mod search;
    pub mod validation;
}
pub mod app;
pub mod components {
    pub mod admin;
    pub mod catalog;
    pub mod search_bar;
}
#[cfg(feature = "ssr")]
pub mod config;
pub mod db {
    pub mod collections;
    pub mod memory;
    pub mod models;
    pub mod page_repository;
    pub mod repository;
}
#[cfg(feature = "ssr")]
pub mod demo_seeder;
pub mod error;
pub mod rendering {
    pub mod markdown;
}
pub mod search {
    pub mod outcome;
    pub mod query;
    pub mod sequencer;
    pub mod service;
    pub mod validator;
}
#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
