use crate::application::ports::BlobStore;
use crate::domain::value_objects::CacheKey;
use crate::shared::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use super::rows::BlobRow;

/// Arbitrary-key blob collection on the shared local SQLite database.
/// Writes are single-key upserts; no cross-key atomicity is offered or
/// needed.
pub struct SqliteBlobStore {
    pool: Pool<Sqlite>,
}

impl SqliteBlobStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    async fn put(
        &self,
        key: &CacheKey,
        content: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO blob_cache (cache_key, content, content_type, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(cache_key) DO UPDATE SET
                content = excluded.content,
                content_type = excluded.content_type,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(content.to_vec())
        .bind(content_type)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<Bytes>, AppError> {
        let row = sqlx::query_as::<_, BlobRow>(
            r#"SELECT * FROM blob_cache WHERE cache_key = ?1"#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Bytes::from(row.content)))
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), AppError> {
        sqlx::query(r#"DELETE FROM blob_cache WHERE cache_key = ?1"#)
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn keys(&self) -> Result<Vec<CacheKey>, AppError> {
        let rows: Vec<(String,)> =
            sqlx::query_as(r#"SELECT cache_key FROM blob_cache ORDER BY cache_key ASC"#)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(key,)| CacheKey::new(key).map_err(AppError::ValidationError))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_store() -> SqliteBlobStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        SqliteBlobStore::new(pool)
    }

    fn key(value: &str) -> CacheKey {
        CacheKey::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn put_get_delete_roundtrip() {
        let store = setup_store().await;
        let cnh_scan = key("driver:d1:cnh");

        store
            .put(&cnh_scan, Bytes::from_static(b"imagebytes"), Some("image/png"))
            .await
            .unwrap();
        assert_eq!(
            store.get(&cnh_scan).await.unwrap(),
            Some(Bytes::from_static(b"imagebytes"))
        );

        store.delete(&cnh_scan).await.unwrap();
        assert_eq!(store.get(&cnh_scan).await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_overwrites_existing_content() {
        let store = setup_store().await;
        let logo = key("shipper:s1:logo");

        store
            .put(&logo, Bytes::from_static(b"v1"), None)
            .await
            .unwrap();
        store
            .put(&logo, Bytes::from_static(b"v2"), None)
            .await
            .unwrap();

        assert_eq!(
            store.get(&logo).await.unwrap(),
            Some(Bytes::from_static(b"v2"))
        );
    }

    #[tokio::test]
    async fn keys_lists_every_stored_blob() {
        let store = setup_store().await;
        store
            .put(&key("b"), Bytes::from_static(b"2"), None)
            .await
            .unwrap();
        store
            .put(&key("a"), Bytes::from_static(b"1"), None)
            .await
            .unwrap();

        let keys: Vec<String> = store
            .keys()
            .await
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
