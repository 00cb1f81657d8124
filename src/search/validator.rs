use bson::{Bson, Document};
use thiserror::Error;

use crate::search::outcome::{SearchKind, SearchResult};

/// A raw search row that does not have the [`SearchResult`] shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("search result row {row}: {reason}")]
pub struct RowValidationError {
    /// Zero-based position of the offending row.
    pub row: usize,
    pub reason: String,
}

/// Check every raw row against the [`SearchResult`] schema.
///
/// All-or-nothing: the first malformed row rejects the whole batch, so a
/// partially valid result set never reaches a consumer. Valid batches are
/// returned in their original order.
pub fn validate_rows(rows: Vec<Document>) -> Result<Vec<SearchResult>, RowValidationError> {
    rows.iter()
        .enumerate()
        .map(|(row, doc)| validate_row(doc).map_err(|reason| RowValidationError { row, reason }))
        .collect()
}

fn validate_row(row: &Document) -> Result<SearchResult, String> {
    let id = required_string(row, "id")?;
    let url = required_string(row, "url")?;
    let title = nullable_string(row, "title")?;

    let kind = match row.get("kind") {
        Some(Bson::String(s)) => SearchKind::parse(s)
            .ok_or_else(|| format!("unknown kind `{s}`, expected Brand, Model or Dealer"))?,
        Some(other) => {
            return Err(format!(
                "`kind` must be a string, found {:?}",
                other.element_type()
            ))
        }
        None => return Err("missing field `kind`".to_string()),
    };

    let parent_brand_title = nullable_string(row, "parentBrandTitle")?;
    match (kind, &parent_brand_title) {
        (SearchKind::Model, None) => {
            return Err("`parentBrandTitle` is required for Model rows".to_string())
        }
        (SearchKind::Brand | SearchKind::Dealer, Some(_)) => {
            return Err(format!(
                "`parentBrandTitle` must be null for {} rows",
                kind.as_str()
            ))
        }
        _ => {}
    }

    Ok(SearchResult {
        id,
        url,
        title,
        kind,
        parent_brand_title,
    })
}

fn required_string(row: &Document, field: &str) -> Result<String, String> {
    match row.get(field) {
        Some(Bson::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Bson::String(_)) => Err(format!("`{field}` must not be empty")),
        Some(other) => Err(format!(
            "`{field}` must be a string, found {:?}",
            other.element_type()
        )),
        None => Err(format!("missing field `{field}`")),
    }
}

fn nullable_string(row: &Document, field: &str) -> Result<Option<String>, String> {
    match row.get(field) {
        Some(Bson::String(s)) => Ok(Some(s.clone())),
        Some(Bson::Null) => Ok(None),
        Some(other) => Err(format!(
            "`{field}` must be a string or null, found {:?}",
            other.element_type()
        )),
        None => Err(format!("missing field `{field}`")),
    }
}
