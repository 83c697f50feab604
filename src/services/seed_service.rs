// src/services/seed_service.rs
// DOCUMENTATION: One-time sample data population
// PURPOSE: Insert the sample places only while the place collection is empty

use crate::db::{DocumentStore, Filter};
use crate::errors::PlacesError;
use crate::models::{Place, PLACE_COLLECTION};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Result of a seed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The collection already held at least one place; nothing was written
    AlreadySeeded,
    /// The collection was empty and this many samples were inserted
    Inserted(usize),
}

/// Response body for POST /seed
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<usize>,
}

impl SeedOutcome {
    pub fn to_response(self) -> SeedResponse {
        match self {
            SeedOutcome::AlreadySeeded => SeedResponse {
                status: "ok".to_string(),
                message: Some("Places already seeded".to_string()),
                inserted: None,
            },
            SeedOutcome::Inserted(count) => SeedResponse {
                status: "ok".to_string(),
                message: None,
                inserted: Some(count),
            },
        }
    }
}

/// Seed guard
/// DOCUMENTATION: The existence check and the inserts run under one async
/// mutex, so concurrent first-time requests in this process insert once.
/// Separate processes sharing a database are not coordinated.
#[derive(Debug, Default)]
pub struct SeedService {
    lock: Mutex<()>,
}

impl SeedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the place collection with the sample places if it is empty
    pub async fn seed(&self, store: &dyn DocumentStore) -> Result<SeedOutcome, PlacesError> {
        let _guard = self.lock.lock().await;

        let existing = store
            .get_documents(PLACE_COLLECTION, &Filter::All, Some(1))
            .await?;
        if !existing.is_empty() {
            log::info!("Seed skipped: place collection already populated");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let places = sample_places();
        for place in &places {
            let document = place
                .to_document()
                .map_err(|e| PlacesError::InvalidInput(e.to_string()))?;
            // no rollback: a failure here leaves earlier samples in place
            let id = store.create_document(PLACE_COLLECTION, document).await?;
            log::debug!("Seeded '{}' as {}", place.name, id);
        }

        log::info!("Seeded {} sample places", places.len());
        Ok(SeedOutcome::Inserted(places.len()))
    }
}

/// The fixed sample places, in insertion order
pub fn sample_places() -> Vec<Place> {
    vec![
        Place {
            name: "Hampi".to_string(),
            city: "Hosapete".to_string(),
            region: Some("Vijayanagara".to_string()),
            category: "UNESCO Site".to_string(),
            era: Some("Vijayanagara Empire".to_string()),
            description: Some(
                "Ruins of the medieval capital with temples, bazaars, and boulder-strewn landscapes."
                    .to_string(),
            ),
            images: vec![
                "https://images.unsplash.com/photo-1563891217998-941dbb4f1cfa".to_string(),
                "https://images.unsplash.com/photo-1603988363607-81f9f0b62a1f".to_string(),
            ],
            latitude: Some(15.3350),
            longitude: Some(76.4600),
            opening_hours: Some("Sunrise to Sunset".to_string()),
            ticket_info: Some("ASI tickets available on-site".to_string()),
            tags: vec!["temples".into(), "ruins".into(), "heritage".into()],
        },
        Place {
            name: "Mysore Palace".to_string(),
            city: "Mysuru".to_string(),
            region: Some("Mysuru".to_string()),
            category: "Palace".to_string(),
            era: Some("Wadiyar Dynasty".to_string()),
            description: Some(
                "Grand royal residence known for its Indo-Saracenic architecture and illumination."
                    .to_string(),
            ),
            images: vec![
                "https://images.unsplash.com/photo-1600804340584-c7db2eacf0bf".to_string(),
            ],
            latitude: Some(12.3052),
            longitude: Some(76.6552),
            opening_hours: Some("10:00 AM - 5:30 PM".to_string()),
            ticket_info: Some("Entry fee applicable".to_string()),
            tags: vec!["palace".into(), "architecture".into()],
        },
        Place {
            name: "Gol Gumbaz".to_string(),
            city: "Vijayapura".to_string(),
            region: Some("Bijapur".to_string()),
            category: "Monument".to_string(),
            era: Some("Adil Shahi Dynasty".to_string()),
            description: Some(
                "Mausoleum of Mohammed Adil Shah, famous for one of the largest domes in the world."
                    .to_string(),
            ),
            images: vec![
                "https://images.unsplash.com/photo-1626625142651-2b3f324b20b9".to_string(),
            ],
            latitude: Some(16.8302),
            longitude: Some(75.7397),
            opening_hours: Some("6:00 AM - 6:00 PM".to_string()),
            ticket_info: Some("Entry fee applicable".to_string()),
            tags: vec!["dome".into(), "mausoleum".into()],
        },
        Place {
            name: "Belur & Halebidu Temples".to_string(),
            city: "Hassan".to_string(),
            region: Some("Hassan".to_string()),
            category: "Temple".to_string(),
            era: Some("Hoysala Empire".to_string()),
            description: Some(
                "Exquisite Hoysala architecture with intricate stone carvings.".to_string(),
            ),
            images: vec![
                "https://images.unsplash.com/photo-1595475033193-9ae70d37a0aa".to_string(),
            ],
            latitude: Some(13.1623),
            longitude: Some(75.8675),
            opening_hours: Some("6:30 AM - 8:00 PM".to_string()),
            ticket_info: Some("Free entry".to_string()),
            tags: vec!["hoysala".into(), "carvings".into()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::Place;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_sample_places_are_complete() {
        let places = sample_places();
        assert_eq!(places.len(), 4);
        assert!(places
            .iter()
            .all(|p: &Place| !p.city.is_empty() && !p.category.is_empty()));
        let names: Vec<_> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Hampi", "Mysore Palace", "Gol Gumbaz", "Belur & Halebidu Temples"]
        );
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = InMemoryStore::new();
        let seeder = SeedService::new();

        assert_eq!(assert_ok!(seeder.seed(&store).await), SeedOutcome::Inserted(4));
        assert_eq!(assert_ok!(seeder.seed(&store).await), SeedOutcome::AlreadySeeded);
        assert_eq!(store.count(PLACE_COLLECTION), 4);
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_collection() {
        let store = InMemoryStore::new();
        let mut existing = crate::db::Document::new();
        existing.insert("name".into(), serde_json::json!("Anything"));
        assert_ok!(store.create_document(PLACE_COLLECTION, existing).await);

        let seeder = SeedService::new();
        assert_eq!(assert_ok!(seeder.seed(&store).await), SeedOutcome::AlreadySeeded);
        assert_eq!(store.count(PLACE_COLLECTION), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_seeds_insert_once() {
        let store = InMemoryStore::new();
        let seeder = SeedService::new();

        let (a, b, c) = tokio::join!(seeder.seed(&store), seeder.seed(&store), seeder.seed(&store));
        let outcomes = [assert_ok!(a), assert_ok!(b), assert_ok!(c)];

        let inserted = outcomes
            .iter()
            .filter(|o| matches!(o, SeedOutcome::Inserted(4)))
            .count();
        assert_eq!(inserted, 1);
        assert_eq!(store.count(PLACE_COLLECTION), 4);
    }

    #[tokio::test]
    async fn test_seed_store_failure() {
        let store = InMemoryStore::new();
        store.set_healthy(false);

        let err = assert_err!(SeedService::new().seed(&store).await);
        assert!(matches!(err, PlacesError::StoreUnavailable(_)));
    }

    #[test]
    fn test_response_shapes() {
        let done = serde_json::to_value(SeedOutcome::AlreadySeeded.to_response()).unwrap();
        assert_eq!(
            done,
            serde_json::json!({"status": "ok", "message": "Places already seeded"})
        );

        let fresh = serde_json::to_value(SeedOutcome::Inserted(4).to_response()).unwrap();
        assert_eq!(fresh, serde_json::json!({"status": "ok", "inserted": 4}));
    }
}
