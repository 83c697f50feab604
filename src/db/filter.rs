// src/db/filter.rs
// DOCUMENTATION: Store-level filter expressions
// PURPOSE: Describe which documents a listing selects, independent of backend

use crate::db::Document;
use serde_json::Value;

/// Fields searched by the free-text `q` parameter
pub const SEARCH_FIELDS: [&str; 3] = ["name", "description", "tags"];

/// Boolean predicate over documents
///
/// `Contains` holds literal text, never a pattern. Backends that match with a
/// pattern language must escape the needle (see [`escape_like`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,
    /// Exact, case-sensitive equality of a string field
    Eq { field: String, value: String },
    /// Case-insensitive substring of a string field, or of any string
    /// element when the field is an array
    Contains { field: String, needle: String },
    /// At least one sub-filter matches (empty: nothing matches)
    Or(Vec<Filter>),
    /// Every sub-filter matches (empty: everything matches)
    And(Vec<Filter>),
}

impl Filter {
    pub fn equals(field: &str, value: &str) -> Self {
        Filter::Eq {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn contains(field: &str, needle: &str) -> Self {
        Filter::Contains {
            field: field.to_string(),
            needle: needle.to_string(),
        }
    }

    /// Build the place listing filter from the optional `q` and `category`
    /// query parameters. Empty strings count as absent.
    ///
    /// - `q` → substring match ORed over name, description and tags
    /// - `category` → exact equality, ANDed with the `q` match
    pub fn for_places(q: Option<&str>, category: Option<&str>) -> Self {
        let mut clauses = Vec::new();

        if let Some(q) = q.filter(|q| !q.is_empty()) {
            clauses.push(Filter::Or(
                SEARCH_FIELDS
                    .iter()
                    .map(|field| Filter::contains(field, q))
                    .collect(),
            ));
        }

        if let Some(category) = category.filter(|c| !c.is_empty()) {
            clauses.push(Filter::equals("category", category));
        }

        match clauses.len() {
            0 => Filter::All,
            1 => clauses.remove(0),
            _ => Filter::And(clauses),
        }
    }

    /// Evaluate the filter against a document
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => {
                matches!(document.get(field), Some(Value::String(s)) if s == value)
            }
            Filter::Contains { field, needle } => {
                let needle = needle.to_lowercase();
                match document.get(field) {
                    Some(Value::String(s)) => contains_ci(s, &needle),
                    Some(Value::Array(items)) => items
                        .iter()
                        .any(|item| matches!(item, Value::String(s) if contains_ci(s, &needle))),
                    _ => false,
                }
            }
            Filter::Or(filters) => filters.iter().any(|f| f.matches(document)),
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
        }
    }
}

/// `needle` must already be lowercase
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Escape SQL LIKE metacharacters so the text only matches itself.
/// Pairs with `ESCAPE '\'` in the query.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
