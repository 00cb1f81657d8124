use axum::routing::{get, post};
use axum::Router;

use crate::api::{brands, catalog, pages, search};
use crate::state::AppState;

/// The JSON API mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/search", get(search::search_handler))
        .route("/api/v1/brands", get(catalog::list_brands_handler))
        .route("/api/v1/brands/{url}", get(catalog::get_brand_handler))
        .route(
            "/api/v1/brands/{brand}/{model}",
            get(catalog::get_model_handler),
        )
        .route("/api/v1/dealers", get(catalog::list_dealers_handler))
        .route("/api/v1/dealers/{url}", get(catalog::get_dealer_handler))
        .route("/api/v1/pages/{url}", get(catalog::get_page_handler))
        .route("/api/v1/admin/brands", post(brands::brand_upsert_handler))
        .route("/api/v1/admin/pages", post(pages::page_upsert_handler))
}
