// src/handlers/seed.rs
// DOCUMENTATION: Sample data handler
// PURPOSE: Expose the idempotent seed routine via REST

use crate::db::SharedStore;
use crate::errors::PlacesError;
use crate::services::SeedService;
use actix_web::{web, HttpResponse, Responder};

/// POST /seed
/// Insert the sample places when the collection is empty
pub async fn seed_places(
    store: web::Data<SharedStore>,
    seeder: web::Data<SeedService>,
) -> Result<impl Responder, PlacesError> {
    log::info!("Seed requested");
    let outcome = seeder.seed(store.get_ref().as_ref()).await?;
    Ok(HttpResponse::Ok().json(outcome.to_response()))
}

/// Configuration for seed routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/seed", web::post().to(seed_places));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::handlers::places_config;
    use crate::models::{ListResponse, PLACE_COLLECTION};
    use crate::services::SeedResponse;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    macro_rules! seeded_app {
        ($memory:expr) => {{
            let store: SharedStore = $memory;
            test::init_service(
                App::new()
                    .app_data(web::Data::new(store))
                    .app_data(web::Data::new(SeedService::new()))
                    .configure(config)
                    .configure(places_config),
            )
            .await
        }};
    }

    fn names(listed: &ListResponse) -> Vec<&str> {
        listed
            .items
            .iter()
            .filter_map(|r| r.get("name").and_then(|n| n.as_str()))
            .collect()
    }

    #[actix_web::test]
    async fn test_seed_twice() {
        let memory = Arc::new(InMemoryStore::new());
        let app = seeded_app!(memory.clone());

        let req = test::TestRequest::post().uri("/seed").to_request();
        let first: SeedResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(first.status, "ok");
        assert_eq!(first.inserted, Some(4));

        let req = test::TestRequest::post().uri("/seed").to_request();
        let second: SeedResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(second.inserted, None);
        assert_eq!(second.message.as_deref(), Some("Places already seeded"));

        assert_eq!(memory.count(PLACE_COLLECTION), 4);
    }

    #[actix_web::test]
    async fn test_seeded_listing_scenario() {
        let memory = Arc::new(InMemoryStore::new());
        let app = seeded_app!(memory.clone());

        let req = test::TestRequest::post().uri("/seed").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // matches through the description only
        let req = test::TestRequest::get().uri("/places?q=Hoysala").to_request();
        let listed: ListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&listed), vec!["Belur & Halebidu Temples"]);

        let req = test::TestRequest::get()
            .uri("/places?category=Palace")
            .to_request();
        let listed: ListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&listed), vec!["Mysore Palace"]);

        let req = test::TestRequest::get().uri("/places").to_request();
        let listed: ListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.items.len(), 4);
        assert!(listed.items.iter().all(|r| r["_id"].is_string()));

        let req = test::TestRequest::get()
            .uri("/places?q=temple&category=UNESCO%20Site")
            .to_request();
        let listed: ListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&listed), vec!["Hampi"]);

        let req = test::TestRequest::get()
            .uri("/places?category=palace")
            .to_request();
        let listed: ListResponse = test::call_and_read_body_json(&app, req).await;
        assert!(listed.items.is_empty());
    }

    #[actix_web::test]
    async fn test_seed_store_down() {
        let memory = Arc::new(InMemoryStore::new());
        memory.set_healthy(false);
        let app = seeded_app!(memory.clone());

        let req = test::TestRequest::post().uri("/seed").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_server_error());
    }
}
