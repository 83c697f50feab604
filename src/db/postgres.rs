// src/db/postgres.rs
// DOCUMENTATION: PostgreSQL-backed document store
// PURPOSE: Persist collections as JSONB rows in a single `documents` table
//
// Case-insensitive search uses ILIKE, which folds case through the
// database's LC_CTYPE. A UTF-8 locale (en_US.UTF-8, C.UTF-8) folds
// non-ASCII letters; the C/POSIX locale folds ASCII only, so "école"
// will not find "ÉCOLE" there.

use crate::db::{escape_like, Document, DocumentStore, Filter, StoreError, ID_KEY};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::Postgres;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

/// Table layout. Created on startup when missing.
const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS documents (
        id UUID PRIMARY KEY,
        collection TEXT NOT NULL,
        body JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection, created_at)",
];

/// Internal struct for mapping database rows to documents
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Document>,
}

impl DocumentRow {
    fn into_document(self) -> Document {
        let mut document = self.body.0;
        document.insert(ID_KEY.to_string(), Value::String(self.id.to_string()));
        document
    }
}

/// Document store over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the documents table and index if they do not exist
    /// DOCUMENTATION: Also warns when the database locale limits search
    /// case-folding to ASCII
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await.map_err(|e| {
                log::error!("Failed to prepare documents table: {}", e);
                StoreError::from(e)
            })?;
        }

        let ctype = self.ctype_locale().await?;
        if folds_ascii_only(&ctype) {
            log::warn!(
                "Database LC_CTYPE is '{}': search ignores case for ASCII letters only; \
                 use a UTF-8 locale for accented text",
                ctype
            );
        }

        log::info!("Documents table ready");
        Ok(())
    }

    /// LC_CTYPE of the connected database
    pub async fn ctype_locale(&self) -> Result<String, StoreError> {
        let ctype: String = sqlx::query_scalar("SELECT current_setting('lc_ctype')")
            .fetch_one(&self.pool)
            .await?;
        Ok(ctype)
    }
}

/// Whether ILIKE under this LC_CTYPE only folds ASCII letters
fn folds_ascii_only(ctype: &str) -> bool {
    matches!(ctype.trim(), "C" | "POSIX" | "")
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create_document(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StoreError> {
        // the row id is authoritative; never persist a caller-supplied one
        document.remove(ID_KEY);
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(Json(&document))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to insert into {}: {}", collection, e);
                StoreError::from(e)
            })?;

        Ok(id.to_string())
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreError> {
        let mut builder = select_documents(collection, filter, limit);
        log::debug!("Executing document query: {}", builder.sql());

        let rows: Vec<DocumentRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Document query on {} failed: {}", collection, e);
                StoreError::from(e)
            })?;

        Ok(rows.into_iter().map(DocumentRow::into_document).collect())
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Build the SELECT for one collection. Every user-supplied value is bound.
fn select_documents<'a>(
    collection: &'a str,
    filter: &'a Filter,
    limit: Option<i64>,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
    builder.push_bind(collection);
    builder.push(" AND ");
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY created_at, id");
    if let Some(limit) = limit {
        builder.push(" LIMIT ");
        builder.push_bind(limit.max(0));
    }
    builder
}

/// Translate a filter into a SQL boolean expression over `body`
fn push_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a Filter) {
    match filter {
        Filter::All => {
            builder.push("TRUE");
        }
        Filter::Eq { field, value } => {
            builder.push("(body ->> ");
            builder.push_bind(field.as_str());
            builder.push(") = ");
            builder.push_bind(value.as_str());
        }
        Filter::Contains { field, needle } => {
            let pattern = format!("%{}%", escape_like(needle));
            // strings match directly, arrays match when any string element does
            builder.push("(CASE jsonb_typeof(body -> ");
            builder.push_bind(field.as_str());
            builder.push(") WHEN 'string' THEN (body ->> ");
            builder.push_bind(field.as_str());
            builder.push(r") ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(r" ESCAPE '\' WHEN 'array' THEN EXISTS (SELECT 1 FROM jsonb_array_elements(body -> ");
            builder.push_bind(field.as_str());
            builder.push(r") AS elem(v) WHERE jsonb_typeof(elem.v) = 'string' AND (elem.v #>> '{}') ILIKE ");
            builder.push_bind(pattern);
            builder.push(r" ESCAPE '\') ELSE FALSE END)");
        }
        Filter::Or(filters) => push_joined(builder, filters, " OR ", "FALSE"),
        Filter::And(filters) => push_joined(builder, filters, " AND ", "TRUE"),
    }
}

fn push_joined<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    filters: &'a [Filter],
    separator: &str,
    empty: &str,
) {
    if filters.is_empty() {
        builder.push(empty);
        return;
    }
    builder.push("(");
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_filter(builder, filter);
    }
    builder.push(")");
}
