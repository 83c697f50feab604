// src/config/db.rs
// DOCUMENTATION: Document store initialization
// PURPOSE: Pick and prepare the store backend selected by configuration

use crate::config::Config;
use crate::db::{InMemoryStore, PgDocumentStore, SharedStore};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Creates connection pool with optimal settings
/// Returns pool that backs the document store
pub async fn init_db_pool(config: &Config, database_url: &str) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing database pool");

    let pool = PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}

/// Build the document store
/// DOCUMENTATION: PostgreSQL when DATABASE_URL is set, in-memory otherwise
pub async fn init_store(config: &Config) -> anyhow::Result<SharedStore> {
    match &config.database_url {
        Some(url) => {
            let pool = init_db_pool(config, url).await?;
            let store = PgDocumentStore::new(pool);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
        None => {
            log::warn!("Using in-memory document store");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}
