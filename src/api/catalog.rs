use serde::{Deserialize, Serialize};

use crate::db::models::{Brand, Dealer, Model, Page};
use crate::db::page_repository::PageRepository;
use crate::db::repository::CatalogRepository;
use crate::error::AppError;
use crate::rendering::markdown::render_markdown;

/// A brand page: the brand with its visible models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandDetail {
    pub brand: Brand,
    pub models: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDetail {
    pub brand: Brand,
    pub model: Model,
}

/// A content page with its Markdown rendered to sanitized HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub seo: Option<String>,
    pub html: String,
}

impl From<Page> for PageView {
    fn from(page: Page) -> Self {
        Self {
            html: render_markdown(&page.content),
            id: page.id,
            url: page.url,
            title: page.title,
            seo: page.seo,
        }
    }
}

fn brand_not_found() -> AppError {
    AppError::NotFound("Brand not found".into())
}

pub async fn load_brands(repo: &dyn CatalogRepository) -> Result<Vec<Brand>, AppError> {
    repo.list_visible_brands().await
}

pub async fn load_brand(repo: &dyn CatalogRepository, url: &str) -> Result<BrandDetail, AppError> {
    let brand = repo
        .find_brand_by_url(url)
        .await?
        .filter(|b| b.visible)
        .ok_or_else(brand_not_found)?;
    let models = repo.list_models_for_brand(&brand.id).await?;
    Ok(BrandDetail { brand, models })
}

/// Visible brands a model link's brand segment may refer to.
///
/// Search results link models as `/brands/{brand title}/{model url}`, while
/// catalog pages link them by brand url, so url, id and title (ignoring
/// case) are all candidates, in that order. One brand's url may equal
/// another brand's title, so every match is kept.
pub async fn brand_candidates(
    repo: &dyn CatalogRepository,
    brand_ref: &str,
) -> Result<Vec<Brand>, AppError> {
    let found = [
        repo.find_brand_by_url(&brand_ref.to_lowercase()).await?,
        repo.find_brand_by_id(brand_ref).await?,
        repo.find_brand_by_title(brand_ref).await?,
    ];
    let mut candidates: Vec<Brand> = Vec::new();
    for brand in found.into_iter().flatten().filter(|b| b.visible) {
        if !candidates.iter().any(|c| c.id == brand.id) {
            candidates.push(brand);
        }
    }
    Ok(candidates)
}

pub async fn load_model(
    repo: &dyn CatalogRepository,
    brand_ref: &str,
    model_url: &str,
) -> Result<ModelDetail, AppError> {
    let candidates = brand_candidates(repo, brand_ref).await?;
    if candidates.is_empty() {
        return Err(brand_not_found());
    }
    for brand in candidates {
        let model = repo
            .find_model(&brand.id, model_url)
            .await?
            .filter(|m| m.visible);
        if let Some(model) = model {
            return Ok(ModelDetail { brand, model });
        }
    }
    Err(AppError::NotFound("Model not found".into()))
}

pub async fn load_dealers(repo: &dyn CatalogRepository) -> Result<Vec<Dealer>, AppError> {
    repo.list_dealers().await
}

pub async fn load_dealer(repo: &dyn CatalogRepository, url: &str) -> Result<Dealer, AppError> {
    repo.find_dealer_by_url(url)
        .await?
        .ok_or_else(|| AppError::NotFound("Dealer not found".into()))
}

pub async fn load_page(repo: &dyn PageRepository, url: &str) -> Result<PageView, AppError> {
    repo.find_by_url(url)
        .await?
        .map(PageView::from)
        .ok_or_else(|| AppError::NotFound("Page not found".into()))
}

#[cfg(feature = "ssr")]
mod handlers {
    use axum::extract::{Path, State};
    use axum::Json;

    use super::*;
    use crate::state::AppState;

    /// `GET /api/v1/brands`
    pub async fn list_brands_handler(
        State(state): State<AppState>,
    ) -> Result<Json<Vec<Brand>>, AppError> {
        Ok(Json(load_brands(state.catalog_repo.as_ref()).await?))
    }

    /// `GET /api/v1/brands/{url}`
    pub async fn get_brand_handler(
        State(state): State<AppState>,
        Path(url): Path<String>,
    ) -> Result<Json<BrandDetail>, AppError> {
        Ok(Json(load_brand(state.catalog_repo.as_ref(), &url).await?))
    }

    /// `GET /api/v1/brands/{brand}/{model}`
    pub async fn get_model_handler(
        State(state): State<AppState>,
        Path((brand, model)): Path<(String, String)>,
    ) -> Result<Json<ModelDetail>, AppError> {
        Ok(Json(
            load_model(state.catalog_repo.as_ref(), &brand, &model).await?,
        ))
    }

    /// `GET /api/v1/dealers`
    pub async fn list_dealers_handler(
        State(state): State<AppState>,
    ) -> Result<Json<Vec<Dealer>>, AppError> {
        Ok(Json(load_dealers(state.catalog_repo.as_ref()).await?))
    }

    /// `GET /api/v1/dealers/{url}`
    pub async fn get_dealer_handler(
        State(state): State<AppState>,
        Path(url): Path<String>,
    ) -> Result<Json<Dealer>, AppError> {
        Ok(Json(load_dealer(state.catalog_repo.as_ref(), &url).await?))
    }

    /// `GET /api/v1/pages/{url}`
    pub async fn get_page_handler(
        State(state): State<AppState>,
        Path(url): Path<String>,
    ) -> Result<Json<PageView>, AppError> {
        Ok(Json(load_page(state.page_repo.as_ref(), &url).await?))
    }
}

#[cfg(feature = "ssr")]
pub use handlers::*;
