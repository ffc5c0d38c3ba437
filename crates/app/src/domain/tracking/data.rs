//! Tracking Data

use serde_json::Value;

use crate::domain::{
    orders::{records::OrderUuid, status::OrderStatus},
    profiles::records::ProfileUuid,
    tracking::records::TrackingEntryUuid,
};

/// A tracking entry ready to be appended.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTrackingEntry {
    pub uuid: TrackingEntryUuid,
    pub order_uuid: OrderUuid,
    pub status: OrderStatus,
    pub message: String,
    pub location: Option<String>,
    pub metadata: Value,
    pub created_by: ProfileUuid,
}

impl NewTrackingEntry {
    /// The entry recorded when an order enters `status`.
    pub(crate) fn for_status(
        order_uuid: OrderUuid,
        status: OrderStatus,
        created_by: ProfileUuid,
    ) -> Self {
        Self {
            uuid: TrackingEntryUuid::new(),
            order_uuid,
            status,
            message: status.tracking_message().to_string(),
            location: None,
            metadata: Value::Object(serde_json::Map::new()),
            created_by,
        }
    }
}

/// A carrier or staff update that does not change the order's status.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualEntry {
    pub message: String,
    pub location: Option<String>,
    pub metadata: Option<Value>,
}
