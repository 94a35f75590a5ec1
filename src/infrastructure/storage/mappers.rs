use crate::domain::entities::OfflineEvent;
use crate::domain::value_objects::{EventKind, EventPayload, SequenceId};
use crate::infrastructure::storage::rows::OfflineEventRow;
use crate::shared::error::AppError;
use chrono::DateTime;

pub fn offline_event_from_row(row: OfflineEventRow) -> Result<OfflineEvent, AppError> {
    let kind = EventKind::new(row.kind).map_err(AppError::ValidationError)?;
    let payload = EventPayload::from_json_str(&row.payload).map_err(AppError::ValidationError)?;
    let captured_at = DateTime::from_timestamp(row.captured_at, 0)
        .ok_or_else(|| AppError::Database(format!("invalid captured_at for event {}", row.id)))?;

    let mut event = OfflineEvent::new(SequenceId::new(row.id), kind, payload, captured_at);
    event.synced = row.synced;
    Ok(event)
}
