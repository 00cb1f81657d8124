use bson::{doc, Bson, Document};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::db::collections;
use crate::db::models::{Brand, Dealer, Model};
use crate::search::outcome::SearchKind;

/// Maximum number of rows a search returns, across all kinds combined.
pub const MAX_RESULTS: usize = 20;

/// A validated, non-empty search over brands, models and dealers.
///
/// The term is matched as a case-insensitive literal substring. When it
/// consists of exactly two space-separated words, models are additionally
/// matched on "brand key + model title" in either order, so `ferrari 458`
/// and `458 ferrari` find the same model.
///
/// Stored titles never contain NUL, and MongoDB refuses a `$regex` holding
/// one, so a term with a NUL byte matches nothing on every backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    pair: Option<(String, String)>,
    limit: usize,
}

impl SearchQuery {
    /// Build a query from raw user input.
    ///
    /// Returns `None` for blank input: an empty term never reaches storage.
    pub fn parse(raw: &str) -> Option<Self> {
        let term = raw.trim();
        if term.is_empty() {
            return None;
        }

        let parts: Vec<&str> = term.split(' ').collect();
        let pair = match parts.as_slice() {
            [first, second] if !first.is_empty() && !second.is_empty() => {
                Some((first.to_string(), second.to_string()))
            }
            _ => None,
        };

        Some(Self {
            term: term.to_string(),
            pair,
            limit: MAX_RESULTS,
        })
    }

    /// Whether no stored record can match this term.
    pub fn matches_nothing(&self) -> bool {
        self.term.contains('\0')
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// The two words of a two-word term.
    pub fn pair(&self) -> Option<(&str, &str)> {
        self.pair
            .as_ref()
            .map(|(first, second)| (first.as_str(), second.as_str()))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn matches_brand(&self, brand: &Brand) -> bool {
        brand.visible && contains_ci(&brand.title, &self.term)
    }

    pub fn matches_model(&self, model: &Model) -> bool {
        if !model.visible {
            return false;
        }

        let plain = contains_ci(&model.title, &self.term)
            || contains_ci(&model.url, &self.term)
            || contains_ci(&model.brand_id, &self.term);

        let compound = self.pair().is_some_and(|(first, second)| {
            (contains_ci(&model.brand_id, first) && contains_ci(&model.title, second))
                || (contains_ci(&model.title, first) && contains_ci(&model.brand_id, second))
        });

        plain || compound
    }

    pub fn matches_dealer(&self, dealer: &Dealer) -> bool {
        contains_ci(&dealer.name, &self.term)
    }

    /// Evaluate the query over in-process collections.
    ///
    /// Produces the same raw rows, in the same order, as [`Self::to_pipeline`]
    /// does against MongoDB. Models whose brand is missing are skipped.
    pub fn collect_rows(&self, brands: &[Brand], models: &[Model], dealers: &[Dealer]) -> Vec<Document> {
        if self.matches_nothing() {
            return Vec::new();
        }

        let mut rows: Vec<(SearchKind, SortKey, String, Document)> = Vec::new();

        for brand in brands.iter().filter(|b| self.matches_brand(b)) {
            rows.push((
                SearchKind::Brand,
                sort_key(&brand.title),
                brand.id.clone(),
                raw_row(&brand.id, &brand.url, &brand.title, SearchKind::Brand, None),
            ));
        }

        for model in models.iter().filter(|m| self.matches_model(m)) {
            let Some(brand) = brands.iter().find(|b| b.id == model.brand_id) else {
                continue;
            };
            rows.push((
                SearchKind::Model,
                sort_key(&model.title),
                model.id.clone(),
                raw_row(
                    &model.id,
                    &model.url,
                    &model.title,
                    SearchKind::Model,
                    Some(&brand.title),
                ),
            ));
        }

        for dealer in dealers.iter().filter(|d| self.matches_dealer(d)) {
            rows.push((
                SearchKind::Dealer,
                sort_key(&dealer.name),
                dealer.id.clone(),
                raw_row(&dealer.id, &dealer.url, &dealer.name, SearchKind::Dealer, None),
            ));
        }

        rows.sort_by(|a, b| {
            (a.0.rank(), &a.1, &a.2).cmp(&(b.0.rank(), &b.1, &b.2))
        });

        rows.into_iter()
            .take(self.limit)
            .map(|(_, _, _, row)| row)
            .collect()
    }

    /// Aggregation pipeline to run on the `models` collection.
    ///
    /// Joins each model to its brand, unions in matching brands and dealers,
    /// then sorts by kind, title and id before truncating to the limit. Run
    /// it with a case-insensitive collation so the title sort ignores case.
    pub fn to_pipeline(&self) -> Vec<Document> {
        let mut model_clauses = vec![
            doc! { "title": literal_regex(&self.term) },
            doc! { "url": literal_regex(&self.term) },
            doc! { "brand_id": literal_regex(&self.term) },
        ];
        if let Some((first, second)) = self.pair() {
            model_clauses.push(doc! {
                "brand_id": literal_regex(first),
                "title": literal_regex(second),
            });
            model_clauses.push(doc! {
                "title": literal_regex(first),
                "brand_id": literal_regex(second),
            });
        }

        let limit = self.limit as i64;

        vec![
            doc! { "$match": { "visible": true, "$or": model_clauses } },
            doc! {
                "$lookup": {
                    "from": collections::BRANDS,
                    "localField": "brand_id",
                    "foreignField": "id",
                    "as": "brand",
                }
            },
            doc! { "$unwind": "$brand" },
            doc! { "$project": row_projection("$title", SearchKind::Model, Bson::String("$brand.title".into())) },
            doc! {
                "$unionWith": {
                    "coll": collections::BRANDS,
                    "pipeline": [
                        { "$match": { "visible": true, "title": literal_regex(&self.term) } },
                        { "$project": row_projection("$title", SearchKind::Brand, Bson::Null) },
                    ],
                }
            },
            doc! {
                "$unionWith": {
                    "coll": collections::DEALERS,
                    "pipeline": [
                        { "$match": { "name": literal_regex(&self.term) } },
                        { "$project": row_projection("$name", SearchKind::Dealer, Bson::Null) },
                    ],
                }
            },
            doc! { "$sort": { "rank": 1, "title": 1, "id": 1 } },
            doc! { "$limit": limit },
            doc! { "$project": { "rank": 0 } },
        ]
    }
}

/// Title ordering close to MongoDB's `en` collation at secondary strength:
/// base letters first, ignoring case and accents, then accents as a tie-break.
type SortKey = (String, String);

fn sort_key(title: &str) -> SortKey {
    let accented: String = title.nfd().flat_map(char::to_lowercase).collect();
    let base = accented.chars().filter(|c| !is_combining_mark(*c)).collect();
    (base, accented)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive `$regex` that matches `value` literally.
fn literal_regex(value: &str) -> Document {
    doc! { "$regex": regex::escape(value), "$options": "i" }
}

/// `$project` stage shaping a row as `(id, url, title, kind, parentBrandTitle)`.
///
/// `title` and `parentBrandTitle` are always present (possibly null), while a
/// missing `id` or `url` is left missing for the validator to reject.
fn row_projection(title_field: &str, kind: SearchKind, parent: Bson) -> Document {
    let parent = match parent {
        Bson::Null => doc! { "$literal": Bson::Null },
        field => doc! { "$ifNull": [field, Bson::Null] },
    };
    doc! {
        "_id": 0,
        "id": 1,
        "url": 1,
        "title": { "$ifNull": [title_field, Bson::Null] },
        "kind": { "$literal": kind.as_str() },
        "parentBrandTitle": parent,
        "rank": { "$literal": kind.rank() },
    }
}

/// A raw row as the storage layer hands it to the validator.
fn raw_row(id: &str, url: &str, title: &str, kind: SearchKind, parent: Option<&str>) -> Document {
    doc! {
        "id": id,
        "url": url,
        "title": title,
        "kind": kind.as_str(),
        "parentBrandTitle": parent.map_or(Bson::Null, |p| Bson::String(p.to_string())),
    }
}
