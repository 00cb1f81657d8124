use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bson::Document;

use crate::db::models::{Brand, Dealer, Model, Page};
use crate::db::page_repository::PageRepository;
use crate::db::repository::CatalogRepository;
use crate::error::AppError;
use crate::search::query::SearchQuery;

/// Process-local catalog used in demo mode and by the API tests.
///
/// Implements both [`CatalogRepository`] and [`PageRepository`] with the
/// same ordering and matching rules as the MongoDB repositories.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    brands: RwLock<Vec<Brand>>,
    models: RwLock<Vec<Model>>,
    dealers: RwLock<Vec<Dealer>>,
    pages: RwLock<Vec<Page>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, AppError> {
    lock.read()
        .map_err(|_| AppError::Internal("catalog lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, AppError> {
    lock.write()
        .map_err(|_| AppError::Internal("catalog lock poisoned".into()))
}

/// Replace the entry with the same id, or append it.
fn upsert_by<T>(items: &mut Vec<T>, item: T, id: impl Fn(&T) -> &str) {
    match items.iter().position(|existing| id(existing) == id(&item)) {
        Some(index) => items[index] = item,
        None => items.push(item),
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Document>, AppError> {
        let brands = read(&self.brands)?;
        let models = read(&self.models)?;
        let dealers = read(&self.dealers)?;
        Ok(query.collect_rows(&brands, &models, &dealers))
    }

    async fn list_visible_brands(&self) -> Result<Vec<Brand>, AppError> {
        let mut brands: Vec<Brand> = read(&self.brands)?
            .iter()
            .filter(|b| b.visible)
            .cloned()
            .collect();
        brands.sort_by_key(|b| b.title.to_lowercase());
        Ok(brands)
    }

    async fn find_brand_by_id(&self, id: &str) -> Result<Option<Brand>, AppError> {
        Ok(read(&self.brands)?.iter().find(|b| b.id == id).cloned())
    }

    async fn find_brand_by_url(&self, url: &str) -> Result<Option<Brand>, AppError> {
        Ok(read(&self.brands)?.iter().find(|b| b.url == url).cloned())
    }

    async fn find_brand_by_title(&self, title: &str) -> Result<Option<Brand>, AppError> {
        let wanted = title.to_lowercase();
        Ok(read(&self.brands)?
            .iter()
            .find(|b| b.title.to_lowercase() == wanted)
            .cloned())
    }

    async fn upsert_brand(&self, brand: Brand) -> Result<(), AppError> {
        upsert_by(&mut *write(&self.brands)?, brand, |b| b.id.as_str());
        Ok(())
    }

    async fn list_models_for_brand(&self, brand_id: &str) -> Result<Vec<Model>, AppError> {
        let mut models: Vec<Model> = read(&self.models)?
            .iter()
            .filter(|m| m.brand_id == brand_id && m.visible)
            .cloned()
            .collect();
        models.sort_by_key(|m| m.title.to_lowercase());
        Ok(models)
    }

    async fn find_model(&self, brand_id: &str, url: &str) -> Result<Option<Model>, AppError> {
        Ok(read(&self.models)?
            .iter()
            .find(|m| m.brand_id == brand_id && m.url == url)
            .cloned())
    }

    async fn upsert_model(&self, model: Model) -> Result<(), AppError> {
        upsert_by(&mut *write(&self.models)?, model, |m| m.id.as_str());
        Ok(())
    }

    async fn list_dealers(&self) -> Result<Vec<Dealer>, AppError> {
        let mut dealers = read(&self.dealers)?.clone();
        dealers.sort_by_key(|d| d.name.to_lowercase());
        Ok(dealers)
    }

    async fn find_dealer_by_url(&self, url: &str) -> Result<Option<Dealer>, AppError> {
        Ok(read(&self.dealers)?.iter().find(|d| d.url == url).cloned())
    }

    async fn upsert_dealer(&self, dealer: Dealer) -> Result<(), AppError> {
        upsert_by(&mut *write(&self.dealers)?, dealer, |d| d.id.as_str());
        Ok(())
    }
}

#[async_trait]
impl PageRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: &str) -> Result<Option<Page>, AppError> {
        Ok(read(&self.pages)?.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Page>, AppError> {
        Ok(read(&self.pages)?.iter().find(|p| p.url == url).cloned())
    }

    async fn upsert(&self, page: Page) -> Result<(), AppError> {
        upsert_by(&mut *write(&self.pages)?, page, |p| p.id.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn brand(id: &str, title: &str, visible: bool) -> Brand {
        Brand {
            id: id.to_string(),
            url: id.to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            country_of_origin: "Germany".to_string(),
            logo_icon: None,
            seo: None,
            visible,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let catalog = InMemoryCatalog::new();
        catalog.upsert_brand(brand("porsche", "Porsche", true)).await.unwrap();
        catalog.upsert_brand(brand("porsche", "Porsche AG", true)).await.unwrap();

        let brands = catalog.list_visible_brands().await.unwrap();
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].title, "Porsche AG");
    }

    #[tokio::test]
    async fn test_list_visible_brands_sorted_case_insensitively() {
        let catalog = InMemoryCatalog::new();
        catalog.upsert_brand(brand("porsche", "porsche", true)).await.unwrap();
        catalog.upsert_brand(brand("alfa", "Alfa Romeo", true)).await.unwrap();
        catalog.upsert_brand(brand("secret", "Secret", false)).await.unwrap();

        let titles: Vec<String> = catalog
            .list_visible_brands()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Alfa Romeo", "porsche"]);
    }

    #[tokio::test]
    async fn test_find_brand_by_title_ignores_case() {
        let catalog = InMemoryCatalog::new();
        catalog.upsert_brand(brand("ferrari", "Ferrari", false)).await.unwrap();

        let found = catalog.find_brand_by_title("FERRARI").await.unwrap();
        assert_eq!(found.map(|b| b.id), Some("ferrari".to_string()));
        assert!(catalog.find_brand_by_title("Ferr").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_pages_roundtrip() {
        let catalog = InMemoryCatalog::new();
        let page = Page {
            id: "p1".to_string(),
            url: "about".to_string(),
            title: "About".to_string(),
            content: "# About".to_string(),
            seo: None,
            updated_at: Utc::now(),
        };
        catalog.upsert(page.clone()).await.unwrap();

        assert_eq!(catalog.find_by_url("about").await.unwrap(), Some(page.clone()));
        assert_eq!(catalog.find_by_id("p1").await.unwrap(), Some(page));
        assert!(catalog.find_by_url("contact").await.unwrap().is_none());
    }
}
