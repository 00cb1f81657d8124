use chrono::Utc;

use crate::api::validation::{
    check_service_token, validate_length, validate_optional, validate_slug, BODY_MAX_LENGTH,
    SEO_MAX_LENGTH, TITLE_MAX_LENGTH,
};
use crate::db::models::{Brand, BrandEditorRequest, EditorResponse};
use crate::db::repository::CatalogRepository;
use crate::error::{AppError, FieldErrors};

/// Core brand editor logic, separated from the HTTP layer for testability.
///
/// Creates a brand (its id becomes the lowercased url) or replaces the
/// fields of an existing one. All field problems are reported together.
pub async fn process_brand_upsert(
    repo: &dyn CatalogRepository,
    request: BrandEditorRequest,
    expected_token: &str,
) -> Result<EditorResponse, AppError> {
    check_service_token(&request.service_token, expected_token)?;

    let mut errors = FieldErrors::new();
    let url = validate_slug(&mut errors, "url", &request.url);
    validate_length(&mut errors, "title", &request.title, 1, TITLE_MAX_LENGTH);
    validate_length(
        &mut errors,
        "description",
        &request.description,
        1,
        BODY_MAX_LENGTH,
    );
    let seo = validate_optional(&mut errors, "seo", request.seo, SEO_MAX_LENGTH);
    errors.into_result()?;

    let id = match request.id.filter(|id| !id.is_empty()) {
        Some(id) => {
            if repo.find_brand_by_id(&id).await?.is_none() {
                return Err(AppError::NotFound("Brand not found".into()));
            }
            id
        }
        None => {
            if repo.find_brand_by_id(&url).await?.is_some() {
                return Err(AppError::BadRequest(format!(
                    "A brand with id '{url}' already exists"
                )));
            }
            url.clone()
        }
    };

    if let Some(existing) = repo.find_brand_by_url(&url).await? {
        if existing.id != id {
            return Err(AppError::BadRequest(format!(
                "The url '{url}' is already used by another brand"
            )));
        }
    }

    let brand = Brand {
        id: id.clone(),
        url: url.clone(),
        title: request.title,
        description: request.description,
        country_of_origin: request.country_of_origin,
        logo_icon: request.logo_icon.filter(|icon| !icon.is_empty()),
        seo,
        visible: request.visible,
        updated_at: Utc::now(),
    };
    repo.upsert_brand(brand).await?;

    tracing::info!(brand = %id, "Brand saved");

    Ok(EditorResponse {
        message: "Brand saved successfully".to_string(),
        redirect: format!("/admin/brands/{id}"),
        id,
        url,
    })
}

/// Axum handler for `POST /api/v1/admin/brands`.
#[cfg(feature = "ssr")]
pub async fn brand_upsert_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::Json(request): axum::Json<BrandEditorRequest>,
) -> Result<axum::Json<EditorResponse>, AppError> {
    let response =
        process_brand_upsert(state.catalog_repo.as_ref(), request, &state.service_token).await?;
    Ok(axum::Json(response))
}
