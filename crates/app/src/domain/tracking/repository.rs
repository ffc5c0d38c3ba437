//! Tracking Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    orders::records::OrderUuid,
    profiles::records::ProfileUuid,
    tracking::{
        data::NewTrackingEntry,
        records::{TrackingEntryRecord, TrackingEntryUuid},
    },
};

const APPEND_TRACKING_ENTRY_SQL: &str = include_str!("sql/append_tracking_entry.sql");
const LIST_TRACKING_ENTRIES_SQL: &str = include_str!("sql/list_tracking_entries.sql");

/// Append-only access to `order_tracking`; entries are never updated or deleted.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PgTrackingRepository;

impl PgTrackingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn append_entry(
        self,
        tx: &mut Transaction<'_, Postgres>,
        entry: NewTrackingEntry,
    ) -> Result<TrackingEntryRecord, sqlx::Error> {
        query_as::<Postgres, TrackingEntryRecord>(APPEND_TRACKING_ENTRY_SQL)
            .bind(entry.uuid.into_uuid())
            .bind(entry.order_uuid.into_uuid())
            .bind(entry.status.as_str())
            .bind(entry.message)
            .bind(entry.location)
            .bind(Json(entry.metadata))
            .bind(entry.created_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Entries for an order, oldest first.
    pub(crate) async fn list_entries(
        self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<TrackingEntryRecord>, sqlx::Error> {
        query_as::<Postgres, TrackingEntryRecord>(LIST_TRACKING_ENTRIES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TrackingEntryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: TrackingEntryUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            message: row.try_get("message")?,
            location: row.try_get("location")?,
            metadata: row.try_get::<Json<Value>, _>("metadata")?.0,
            created_by: row
                .try_get::<Option<Uuid>, _>("created_by")?
                .map(ProfileUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
