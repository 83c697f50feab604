// src/services/place_service.rs
// DOCUMENTATION: Business logic for places
// PURPOSE: Intermediary between handlers and the document store

use crate::db::{DocumentStore, Filter};
use crate::errors::PlacesError;
use crate::models::{listed_document, CreatedResponse, ListQuery, ListResponse, Place, PLACE_COLLECTION};

pub struct PlaceService;

impl PlaceService {
    /// List places matching the optional `q` / `category` parameters
    pub async fn list_places(
        store: &dyn DocumentStore,
        query: ListQuery,
    ) -> Result<ListResponse, PlacesError> {
        let filter = Filter::for_places(query.q.as_deref(), query.category.as_deref());
        log::debug!("Listing places with filter: {:?}", filter);

        let documents = store
            .get_documents(PLACE_COLLECTION, &filter, None)
            .await?;

        let items: Vec<_> = documents.into_iter().map(listed_document).collect();

        log::debug!("Listing returned {} places", items.len());
        Ok(ListResponse { items })
    }

    /// Persist a new place; the extractor has already checked its shape
    pub async fn create_place(
        store: &dyn DocumentStore,
        place: Place,
    ) -> Result<CreatedResponse, PlacesError> {
        let document = place
            .to_document()
            .map_err(|e| PlacesError::InvalidInput(e.to_string()))?;

        let id = store.create_document(PLACE_COLLECTION, document).await?;
        log::info!("Created place '{}' with id: {}", place.name, id);
        Ok(CreatedResponse { id })
    }
}
