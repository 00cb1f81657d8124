use async_trait::async_trait;
use bson::Document;

use crate::db::models::{Brand, Dealer, Model};
use crate::error::AppError;
use crate::search::query::SearchQuery;

/// Repository trait for the brand/model/dealer catalog.
///
/// This trait allows swapping MongoDB for the in-memory catalog (demo mode
/// and tests).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Run a cross-entity search and return the raw, unvalidated rows.
    ///
    /// Rows are shaped `{ id, url, title, kind, parentBrandTitle }`, already
    /// ordered and capped at `query.limit()`.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Document>, AppError>;

    /// All visible brands, sorted by title.
    async fn list_visible_brands(&self) -> Result<Vec<Brand>, AppError>;

    /// Find a brand by id, regardless of visibility.
    async fn find_brand_by_id(&self, id: &str) -> Result<Option<Brand>, AppError>;

    /// Find a brand by url slug, regardless of visibility.
    async fn find_brand_by_url(&self, url: &str) -> Result<Option<Brand>, AppError>;

    /// Find a brand by title, ignoring case, regardless of visibility.
    async fn find_brand_by_title(&self, title: &str) -> Result<Option<Brand>, AppError>;

    /// Create a brand or replace the one with the same id.
    async fn upsert_brand(&self, brand: Brand) -> Result<(), AppError>;

    /// Visible models of a brand, sorted by title.
    async fn list_models_for_brand(&self, brand_id: &str) -> Result<Vec<Model>, AppError>;

    /// Find a brand's model by url slug, regardless of visibility.
    async fn find_model(&self, brand_id: &str, url: &str) -> Result<Option<Model>, AppError>;

    /// Create a model or replace the one with the same id.
    async fn upsert_model(&self, model: Model) -> Result<(), AppError>;

    /// All dealers, sorted by name.
    async fn list_dealers(&self) -> Result<Vec<Dealer>, AppError>;

    async fn find_dealer_by_url(&self, url: &str) -> Result<Option<Dealer>, AppError>;

    /// Create a dealer or replace the one with the same id.
    async fn upsert_dealer(&self, dealer: Dealer) -> Result<(), AppError>;
}

/// MongoDB implementation of the CatalogRepository.
///
/// This is only available when the `ssr` feature is enabled (i.e., server-side).
#[cfg(feature = "ssr")]
pub struct MongoCatalogRepository {
    brands: mongodb::Collection<Brand>,
    models: mongodb::Collection<Model>,
    dealers: mongodb::Collection<Dealer>,
}

#[cfg(feature = "ssr")]
impl MongoCatalogRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        use crate::db::collections;

        Self {
            brands: db.collection(collections::BRANDS),
            models: db.collection(collections::MODELS),
            dealers: db.collection(collections::DEALERS),
        }
    }
}

/// Collation used for every title/name comparison: English, case-insensitive.
#[cfg(feature = "ssr")]
pub(crate) fn case_insensitive() -> mongodb::options::Collation {
    use mongodb::options::{Collation, CollationStrength};

    Collation::builder()
        .locale("en".to_string())
        .strength(CollationStrength::Secondary)
        .build()
}

#[cfg(feature = "ssr")]
async fn collect_all<T>(cursor: mongodb::Cursor<T>) -> Result<Vec<T>, AppError>
where
    T: serde::de::DeserializeOwned + Send + Sync + Unpin,
{
    use futures::TryStreamExt;

    cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

#[cfg(feature = "ssr")]
#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Document>, AppError> {
        use mongodb::options::AggregateOptions;

        if query.matches_nothing() {
            return Ok(Vec::new());
        }

        let options = AggregateOptions::builder()
            .collation(case_insensitive())
            .build();

        let cursor = self
            .models
            .aggregate(query.to_pipeline())
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        collect_all(cursor).await
    }

    async fn list_visible_brands(&self) -> Result<Vec<Brand>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "title": 1 })
            .collation(case_insensitive())
            .build();

        let cursor = self
            .brands
            .find(doc! { "visible": true })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        collect_all(cursor).await
    }

    async fn find_brand_by_id(&self, id: &str) -> Result<Option<Brand>, AppError> {
        use mongodb::bson::doc;

        self.brands
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_brand_by_url(&self, url: &str) -> Result<Option<Brand>, AppError> {
        use mongodb::bson::doc;

        self.brands
            .find_one(doc! { "url": url })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_brand_by_title(&self, title: &str) -> Result<Option<Brand>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOneOptions;

        let options = FindOneOptions::builder()
            .collation(case_insensitive())
            .build();

        self.brands
            .find_one(doc! { "title": title })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert_brand(&self, brand: Brand) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();

        self.brands
            .replace_one(doc! { "id": &brand.id }, &brand)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_models_for_brand(&self, brand_id: &str) -> Result<Vec<Model>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "title": 1 })
            .collation(case_insensitive())
            .build();

        let cursor = self
            .models
            .find(doc! { "brand_id": brand_id, "visible": true })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        collect_all(cursor).await
    }

    async fn find_model(&self, brand_id: &str, url: &str) -> Result<Option<Model>, AppError> {
        use mongodb::bson::doc;

        self.models
            .find_one(doc! { "brand_id": brand_id, "url": url })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert_model(&self, model: Model) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();

        self.models
            .replace_one(doc! { "id": &model.id }, &model)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_dealers(&self) -> Result<Vec<Dealer>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "name": 1 })
            .collation(case_insensitive())
            .build();

        let cursor = self
            .dealers
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        collect_all(cursor).await
    }

    async fn find_dealer_by_url(&self, url: &str) -> Result<Option<Dealer>, AppError> {
        use mongodb::bson::doc;

        self.dealers
            .find_one(doc! { "url": url })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert_dealer(&self, dealer: Dealer) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();

        self.dealers
            .replace_one(doc! { "id": &dealer.id }, &dealer)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
