use crate::application::ports::EventQueueStore;
use crate::domain::entities::OfflineEvent;
use crate::domain::value_objects::{EventKind, EventPayload, SequenceId};
use crate::infrastructure::storage::mappers::offline_event_from_row;
use crate::infrastructure::storage::rows::OfflineEventRow;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

/// Append-only event queue on the shared local SQLite database. Sequence
/// ids come from the AUTOINCREMENT primary key, so they strictly increase
/// in append order and are never reused after a delete.
pub struct SqliteEventQueueStore {
    pool: Pool<Sqlite>,
}

impl SqliteEventQueueStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventQueueStore for SqliteEventQueueStore {
    async fn append(
        &self,
        kind: &EventKind,
        payload: &EventPayload,
        captured_at: DateTime<Utc>,
    ) -> Result<SequenceId, AppError> {
        let payload_json = serde_json::to_string(payload.as_json())?;

        let result = sqlx::query(
            r#"
            INSERT INTO offline_events (kind, payload, captured_at, synced)
            VALUES (?1, ?2, ?3, 0)
            "#,
        )
        .bind(kind.as_str())
        .bind(&payload_json)
        .bind(captured_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(SequenceId::new(result.last_insert_rowid()))
    }

    async fn pending(&self) -> Result<Vec<OfflineEvent>, AppError> {
        let rows = sqlx::query_as::<_, OfflineEventRow>(
            r#"
            SELECT * FROM offline_events
            WHERE synced = 0
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(offline_event_from_row).collect()
    }

    async fn remove(&self, id: SequenceId) -> Result<(), AppError> {
        sqlx::query(r#"DELETE FROM offline_events WHERE id = ?1"#)
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
