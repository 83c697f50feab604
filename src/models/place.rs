// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Defines the place schema plus the request/response DTOs around it

use crate::db::{document_id, Document, ID_KEY};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Collection holding place documents
pub const PLACE_COLLECTION: &str = "place";

/// A historical or monumental site
/// DOCUMENTATION: Checks POST /places bodies. `name`, `city` and `category`
/// must be present strings (empty is allowed); everything else is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Place name
    pub name: String,

    /// Nearest city or town
    pub city: String,

    /// Region or district
    #[serde(default)]
    pub region: Option<String>,

    /// Free-form type label: Fort, Temple, Palace, UNESCO Site, Monument...
    pub category: String,

    /// Historical era or dynasty
    #[serde(default)]
    pub era: Option<String>,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Image URLs
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Visitor hours
    #[serde(default)]
    pub opening_hours: Option<String>,

    /// Ticket details if any
    #[serde(default)]
    pub ticket_info: Option<String>,

    /// Search tags
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

/// Explicit `null` lists behave like missing ones
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Place {
    /// Convert into a store document
    pub fn to_document(&self) -> Result<Document, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "place serialized to non-object: {}",
                other
            ))),
        }
    }
}

/// Shape a stored document for API output
/// DOCUMENTATION: Every stored field is kept as-is, whatever its shape.
/// Only `_id` is rewritten: a string identifier, or `null` when there is none.
pub fn listed_document(mut document: Document) -> Document {
    let id = document_id(&document).map_or(Value::Null, Value::String);
    document.insert(ID_KEY.to_string(), id);
    document
}

/// Query parameters for GET /places
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Free-text search over name, description and tags
    pub q: Option<String>,

    /// Exact category
    pub category: Option<String>,
}

/// Response for GET /places
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<Document>,
}

/// Response for POST /places
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}
