use serde::Deserialize;

/// Query string of `GET /api/v1/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: Option<String>,
}

/// Axum handler for `GET /api/v1/search?search=<term>`.
///
/// Idle outcomes are returned with 200, a rejected result batch with 400.
#[cfg(feature = "ssr")]
pub async fn search_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Query(params): axum::extract::Query<SearchParams>,
) -> Result<impl axum::response::IntoResponse, crate::error::AppError> {
    use crate::search::outcome::SearchOutcome;
    use crate::search::service::process_search;
    use axum::http::StatusCode;

    let outcome = process_search(state.catalog_repo.as_ref(), params.search.as_deref()).await?;

    let status = match outcome {
        SearchOutcome::Error => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    };

    Ok((status, axum::Json(outcome)))
}
