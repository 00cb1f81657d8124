use crate::db::repository::CatalogRepository;
use crate::error::AppError;
use crate::search::outcome::SearchOutcome;
use crate::search::query::SearchQuery;
use crate::search::validator::validate_rows;

/// Core search logic, separated from the HTTP layer for testability.
///
/// A missing or blank term short-circuits to `Idle { results: None }`
/// without touching storage. Otherwise exactly one read-only query runs and
/// its rows are validated as a batch: any malformed row turns the whole
/// outcome into `Error`. Storage failures propagate as `AppError`.
pub async fn process_search(
    repo: &dyn CatalogRepository,
    raw_term: Option<&str>,
) -> Result<SearchOutcome, AppError> {
    let Some(query) = raw_term.and_then(SearchQuery::parse) else {
        return Ok(SearchOutcome::idle());
    };

    if query.matches_nothing() {
        return Ok(SearchOutcome::Idle {
            results: Some(Vec::new()),
        });
    }

    let rows = repo.search(&query).await?;

    match validate_rows(rows) {
        Ok(mut results) => {
            results.truncate(query.limit());
            tracing::debug!(term = %query.term(), hits = results.len(), "Search completed");
            Ok(SearchOutcome::Idle {
                results: Some(results),
            })
        }
        Err(e) => {
            tracing::warn!(term = %query.term(), "Rejecting search results: {e}");
            Ok(SearchOutcome::Error)
        }
    }
}
