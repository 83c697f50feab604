// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::db::SharedStore;
use crate::errors::PlacesError;
use crate::models::{ListQuery, Place};
use crate::services::PlaceService;
use actix_web::{error, web, HttpRequest, HttpResponse, Responder};

/// GET /places
/// List places, optionally filtered by `q` and `category`
pub async fn list_places(
    store: web::Data<SharedStore>,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, PlacesError> {
    let result = PlaceService::list_places(store.get_ref().as_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// POST /places
/// Create a new place
pub async fn create_place(
    store: web::Data<SharedStore>,
    req: web::Json<Place>,
) -> Result<impl Responder, PlacesError> {
    let created = PlaceService::create_place(store.get_ref().as_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Turn body extraction failures (missing field, wrong type, bad JSON)
/// into INVALID_INPUT responses naming the problem
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected place body: {}", err);
    PlacesError::InvalidInput(err.to_string()).into()
}

/// Query string failures (duplicate or undecodable parameters) get the
/// same INVALID_INPUT body
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected place query: {}", err);
    PlacesError::InvalidInput(err.to_string()).into()
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/places")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route(web::get().to(list_places))
            .route(web::post().to(create_place)),
    );
}
