use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct OfflineEventRow {
    pub id: i64,
    pub kind: String,
    pub payload: String,
    pub captured_at: i64,
    pub synced: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct BlobRow {
    pub cache_key: String,
    pub content: Vec<u8>,
    pub content_type: Option<String>,
    pub updated_at: i64,
}
