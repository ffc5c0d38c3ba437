//! Tracking Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use attar_app::domain::tracking::records::TrackingEntryRecord;

/// One event on an order's timeline.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackingEntryResponse {
    pub uuid: Uuid,
    pub status: String,
    pub message: String,
    pub location: Option<String>,
    pub metadata: Value,
    pub created_by: Option<Uuid>,
    pub created_at: String,
}

impl From<TrackingEntryRecord> for TrackingEntryResponse {
    fn from(entry: TrackingEntryRecord) -> Self {
        Self {
            uuid: entry.uuid.into(),
            status: entry.status.to_string(),
            message: entry.message,
            location: entry.location,
            metadata: entry.metadata,
            created_by: entry.created_by.map(Into::into),
            created_at: entry.created_at.to_string(),
        }
    }
}
