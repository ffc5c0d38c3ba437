//! Tracking Records

use jiff::Timestamp;
use serde_json::Value;

use crate::{
    domain::{
        orders::{records::OrderUuid, status::OrderStatus},
        profiles::records::ProfileUuid,
    },
    uuids::TypedUuid,
};

/// Tracking Entry UUID
pub type TrackingEntryUuid = TypedUuid<TrackingEntryRecord>;

/// One immutable event on an order's timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingEntryRecord {
    pub uuid: TrackingEntryUuid,
    pub order_uuid: OrderUuid,

    /// The order's status when the entry was written.
    pub status: OrderStatus,
    pub message: String,
    pub location: Option<String>,
    pub metadata: Value,
    pub created_by: Option<ProfileUuid>,
    pub created_at: Timestamp,
}
