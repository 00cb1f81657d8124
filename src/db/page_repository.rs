use async_trait::async_trait;

use crate::db::models::Page;
use crate::error::AppError;

/// Repository trait for static content pages.
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Page>, AppError>;

    async fn find_by_url(&self, url: &str) -> Result<Option<Page>, AppError>;

    /// Create a page or replace the one with the same id.
    async fn upsert(&self, page: Page) -> Result<(), AppError>;
}

/// MongoDB implementation of the PageRepository.
#[cfg(feature = "ssr")]
pub struct MongoPageRepository {
    collection: mongodb::Collection<Page>,
}

#[cfg(feature = "ssr")]
impl MongoPageRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(crate::db::collections::PAGES),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl PageRepository for MongoPageRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Page>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Page>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "url": url })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn upsert(&self, page: Page) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "id": &page.id }, &page)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
