use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body of a queued offline event. Null payloads are rejected at the
/// boundary so replay code never has to deal with them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventPayload(Value);

impl EventPayload {
    pub fn new(value: Value) -> Result<Self, String> {
        if value.is_null() {
            return Err("Event payload cannot be null".to_string());
        }
        Ok(Self(value))
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid JSON payload: {e}"))?;
        Self::new(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<EventPayload> for Value {
    fn from(payload: EventPayload) -> Self {
        payload.0
    }
}
