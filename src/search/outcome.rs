use serde::{Deserialize, Serialize};

/// The entity a [`SearchResult`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    Brand,
    Model,
    Dealer,
}

impl SearchKind {
    /// Wire name, as stored in the `kind` column of raw rows.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Brand => "Brand",
            SearchKind::Model => "Model",
            SearchKind::Dealer => "Dealer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Brand" => Some(SearchKind::Brand),
            "Model" => Some(SearchKind::Model),
            "Dealer" => Some(SearchKind::Dealer),
            _ => None,
        }
    }

    /// Position of this kind in the result ordering (brands first).
    pub fn rank(self) -> i32 {
        match self {
            SearchKind::Brand => 0,
            SearchKind::Model => 1,
            SearchKind::Dealer => 2,
        }
    }
}

/// Unified projection of a brand, model or dealer matched by a search.
///
/// `parent_brand_title` is set if and only if `kind` is [`SearchKind::Model`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub url: String,
    pub title: Option<String>,
    pub kind: SearchKind,
    pub parent_brand_title: Option<String>,
}

impl SearchResult {
    /// Destination path of the result link.
    pub fn href(&self) -> String {
        match self.kind {
            SearchKind::Brand => format!("/brands/{}", self.url),
            SearchKind::Model => format!(
                "/brands/{}/{}",
                self.parent_brand_title.as_deref().unwrap_or_default(),
                self.url
            ),
            SearchKind::Dealer => format!("/dealers/{}", self.url),
        }
    }

    /// Text shown for the result, e.g. `Ferrari 458`.
    pub fn label(&self) -> String {
        [self.parent_brand_title.as_deref(), self.title.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// State of the global search as seen by the presenter.
///
/// `Idle { results: None }` means no term was submitted, while
/// `Idle { results: Some(vec![]) }` means the term matched nothing.
/// `Pending` is only ever produced client-side while a request is in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SearchOutcome {
    Idle { results: Option<Vec<SearchResult>> },
    Pending,
    Error,
}

impl SearchOutcome {
    /// Outcome for an absent or blank term.
    pub fn idle() -> Self {
        SearchOutcome::Idle { results: None }
    }

    pub fn results(&self) -> Option<&[SearchResult]> {
        match self {
            SearchOutcome::Idle { results } => results.as_deref(),
            _ => None,
        }
    }
}

impl Default for SearchOutcome {
    fn default() -> Self {
        Self::idle()
    }
}
