use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A car manufacturer stored in the `brands` collection.
///
/// The `id` of a brand created through the editor equals its url slug,
/// which makes it the human-typable key the search matches model queries
/// against (e.g. `ferrari`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    /// Lowercase URL slug, unique across brands.
    pub url: String,
    pub title: String,
    pub description: String,
    pub country_of_origin: String,
    #[serde(default)]
    pub logo_icon: Option<String>,
    /// Meta description for search engines.
    #[serde(default)]
    pub seo: Option<String>,
    /// Hidden brands are neither listed nor searchable.
    #[serde(default)]
    pub visible: bool,
    pub updated_at: DateTime<Utc>,
}

/// A car model, owned by exactly one [`Brand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub url: String,
    pub title: String,
    /// The owning brand's `id`.
    pub brand_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visible: bool,
    pub updated_at: DateTime<Utc>,
}

/// A sales location. Dealers have no visibility flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// A static content page; `content` is Markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub url: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub seo: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// The request payload for the brand editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandEditorRequest {
    /// Service authentication token.
    pub service_token: String,
    /// Present when editing an existing brand.
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    pub title: String,
    pub description: String,
    pub country_of_origin: String,
    #[serde(default)]
    pub logo_icon: Option<String>,
    #[serde(default)]
    pub seo: Option<String>,
    #[serde(default)]
    pub visible: bool,
}

/// The request payload for the page editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEditorRequest {
    pub service_token: String,
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub seo: Option<String>,
}

/// The response from a successful editor submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorResponse {
    pub message: String,
    pub id: String,
    pub url: String,
    /// Where the admin UI navigates after saving.
    pub redirect: String,
}
