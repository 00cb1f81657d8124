use std::sync::Arc;

use leptos::prelude::{LeptosOptions, ServerFnError};

use crate::db::page_repository::PageRepository;
use crate::db::repository::CatalogRepository;
use crate::error::AppError;

/// Shared server state, handed to axum handlers and provided to Leptos
/// server functions through context.
#[derive(Clone)]
pub struct AppState {
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub page_repo: Arc<dyn PageRepository>,
    pub service_token: String,
    pub leptos_options: LeptosOptions,
}

impl axum::extract::FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

/// Fetch the [`AppState`] from inside a server function.
pub fn use_app_state() -> Result<AppState, ServerFnError> {
    leptos::prelude::use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))
}

/// Convert an [`AppError`] for the server function boundary.
pub fn server_error(err: AppError) -> ServerFnError {
    ServerFnError::new(err.to_string())
}
