//! Queries against the content tables
//!
//! Both tables are filled by an external ingestion pipeline; everything here
//! is read-only SELECTs. Table names come from the `ContentTable` enum, so no
//! user-supplied identifier ever reaches the SQL text.

use chrono::{DateTime, Utc};
use pgvector::Vector;
use tracing::debug;
use tracing::warn;

use super::Database;
use crate::models::{ContentItem, ContentListItem, ContentTable};
use crate::Result;

/// Full row as fetched; the embedding comes back in its text form and is
/// parsed separately so one malformed vector doesn't fail the whole query.
#[derive(sqlx::FromRow)]
struct RawItem {
    id: i64,
    version: Option<String>,
    release_date: Option<String>,
    runtime_versions: Option<String>,
    name: Option<String>,
    file_path: Option<String>,
    content: Option<String>,
    embedding: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl RawItem {
    fn into_item(self) -> ContentItem {
        let embedding = self.embedding.as_deref().and_then(|text| {
            let parsed = crate::models::parse_vector_text(text);
            if parsed.is_none() {
                warn!("Malformed stored embedding for item id {}; ignoring", self.id);
            }
            parsed
        });

        ContentItem {
            id: self.id,
            version: self.version,
            release_date: self.release_date,
            runtime_versions: self.runtime_versions,
            name: self.name,
            file_path: self.file_path,
            content: self.content,
            embedding,
            created_at: self.created_at,
        }
    }
}

// Casts pin the wire types regardless of how the ingestion pipeline declared
// the columns (SERIAL vs BIGSERIAL, timestamp vs timestamptz).
const ITEM_COLUMNS: &str = "id::bigint as id, version, release_date, runtime_versions, name, \
                            file_path, content, embedding::text as embedding, \
                            created_at::timestamptz as created_at";

impl Database {
    /// List summarized rows, ordered by primary key
    pub async fn list_items(
        &self,
        table: ContentTable,
        limit: i64,
    ) -> Result<Vec<ContentListItem>> {
        // The embeddings table often has unnamed rows; fall back to a content prefix
        let name_expr = if table.name_falls_back_to_content() {
            "COALESCE(name, LEFT(content, 50))"
        } else {
            "name"
        };

        let query = format!(
            "SELECT id::bigint as id, {name_expr} as name, version, \
             created_at::timestamptz as created_at \
             FROM \"{table}\" ORDER BY id ASC LIMIT $1",
            table = table.table_name(),
        );

        let items = sqlx::query_as::<_, ContentListItem>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} summarized items from {}", items.len(), table);
        Ok(items)
    }

    /// Fetch one full row by id, including its stored embedding
    pub async fn get_item(&self, table: ContentTable, id: i64) -> Result<Option<ContentItem>> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM \"{table}\" WHERE id = $1",
            table = table.table_name(),
        );

        let raw = sqlx::query_as::<_, RawItem>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(raw.map(RawItem::into_item))
    }

    /// Nearest-neighbor search ordered by the pgvector distance operator,
    /// with an optional equality filter on the version column.
    ///
    /// Ranking here is delegated entirely to the database's vector index;
    /// callers re-rank locally by cosine similarity afterwards.
    pub async fn semantic_search(
        &self,
        table: ContentTable,
        query_embedding: &[f32],
        limit: i64,
        version: Option<&str>,
    ) -> Result<Vec<ContentItem>> {
        if query_embedding.is_empty() {
            warn!("Semantic search called with an empty query embedding");
            return Ok(Vec::new());
        }

        let version = version.map(str::trim).filter(|v| !v.is_empty());

        let query = if version.is_some() {
            format!(
                "SELECT {ITEM_COLUMNS} FROM \"{table}\" \
                 WHERE version = $1 \
                 ORDER BY embedding <=> $2::vector LIMIT $3",
                table = table.table_name(),
            )
        } else {
            format!(
                "SELECT {ITEM_COLUMNS} FROM \"{table}\" \
                 ORDER BY embedding <=> $1::vector LIMIT $2",
                table = table.table_name(),
            )
        };

        debug!(
            "Semantic search in {} for version {}",
            table,
            version.unwrap_or("any")
        );

        let vector = Vector::from(query_embedding.to_vec());
        let mut q = sqlx::query_as::<_, RawItem>(&query);
        if let Some(v) = version {
            q = q.bind(v);
        }
        let raw = q.bind(vector).bind(limit).fetch_all(&self.pool).await?;

        debug!("Semantic search found {} items in {}", raw.len(), table);
        Ok(raw.into_iter().map(RawItem::into_item).collect())
    }

    /// Distinct version tags present in the table, newest-looking first.
    /// Feeds the version autocomplete.
    pub async fn list_versions(&self, table: ContentTable) -> Result<Vec<String>> {
        let query = format!(
            "SELECT DISTINCT version FROM \"{table}\" \
             WHERE version IS NOT NULL ORDER BY version DESC",
            table = table.table_name(),
        );

        let versions = sqlx::query_scalar::<_, String>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(versions)
    }
}
