use chrono::Utc;

use crate::api::validation::{
    check_service_token, validate_length, validate_optional, validate_slug, BODY_MAX_LENGTH,
    SEO_MAX_LENGTH, TITLE_MAX_LENGTH,
};
use crate::db::models::{EditorResponse, Page, PageEditorRequest};
use crate::db::page_repository::PageRepository;
use crate::error::{AppError, FieldErrors};

/// Core page editor logic. New pages get a random UUID v4 id.
pub async fn process_page_upsert(
    repo: &dyn PageRepository,
    request: PageEditorRequest,
    expected_token: &str,
) -> Result<EditorResponse, AppError> {
    check_service_token(&request.service_token, expected_token)?;

    let mut errors = FieldErrors::new();
    let url = validate_slug(&mut errors, "url", &request.url);
    validate_length(&mut errors, "title", &request.title, 1, TITLE_MAX_LENGTH);
    validate_length(&mut errors, "content", &request.content, 1, BODY_MAX_LENGTH);
    let seo = validate_optional(&mut errors, "seo", request.seo, SEO_MAX_LENGTH);
    errors.into_result()?;

    let id = match request.id.filter(|id| !id.is_empty()) {
        Some(id) => {
            if repo.find_by_id(&id).await?.is_none() {
                return Err(AppError::NotFound("Page not found".into()));
            }
            id
        }
        None => uuid::Uuid::new_v4().to_string(),
    };

    if let Some(existing) = repo.find_by_url(&url).await? {
        if existing.id != id {
            return Err(AppError::BadRequest(format!(
                "The url '{url}' is already used by another page"
            )));
        }
    }

    repo.upsert(Page {
        id: id.clone(),
        url: url.clone(),
        title: request.title,
        content: request.content,
        seo,
        updated_at: Utc::now(),
    })
    .await?;

    tracing::info!(page = %id, url = %url, "Page saved");

    Ok(EditorResponse {
        message: "Page saved successfully".to_string(),
        redirect: format!("/admin/pages/{id}"),
        id,
        url,
    })
}

/// Axum handler for `POST /api/v1/admin/pages`.
#[cfg(feature = "ssr")]
pub async fn page_upsert_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::Json(request): axum::Json<PageEditorRequest>,
) -> Result<axum::Json<EditorResponse>, AppError> {
    let response =
        process_page_upsert(state.page_repo.as_ref(), request, &state.service_token).await?;
    Ok(axum::Json(response))
}
