//! Tracking service.

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        orders::{
            records::{OrderAccess, OrderUuid},
            repositories::PgOrdersRepository,
        },
        tracking::{
            data::{ManualEntry, NewTrackingEntry},
            errors::TrackingServiceError,
            records::TrackingEntryRecord,
            repository::PgTrackingRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTrackingService {
    db: Db,
    orders_repository: PgOrdersRepository,
    repository: PgTrackingRepository,
}

impl PgTrackingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            repository: PgTrackingRepository::new(),
        }
    }
}

#[async_trait]
impl TrackingService for PgTrackingService {
    async fn get_timeline(
        &self,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<Vec<TrackingEntryRecord>, TrackingServiceError> {
        let mut tx = self.db.begin().await?;

        self.orders_repository
            .get_order(&mut tx, order, access.owner())
            .await?;

        let entries = self.repository.list_entries(&mut tx, order).await?;

        tx.commit().await?;

        Ok(entries)
    }

    #[tracing::instrument(
        name = "tracking.service.add_manual_entry",
        skip(self, actor, entry),
        fields(order_uuid = %order),
        err
    )]
    async fn add_manual_entry(
        &self,
        actor: Principal,
        order: OrderUuid,
        entry: ManualEntry,
    ) -> Result<TrackingEntryRecord, TrackingServiceError> {
        if !actor.is_staff() {
            return Err(TrackingServiceError::Forbidden);
        }

        let message = entry.message.trim();

        if message.is_empty() {
            return Err(TrackingServiceError::MissingRequiredData);
        }

        let metadata = match entry.metadata {
            Some(Value::Object(metadata)) => Value::Object(metadata),
            Some(_) => return Err(TrackingServiceError::InvalidMetadata),
            None => Value::Object(serde_json::Map::new()),
        };

        let mut tx = self.db.begin().await?;

        // Locked so the entry records the status the order has when it commits.
        let current = self.orders_repository.lock_order(&mut tx, order).await?;

        let appended = self
            .repository
            .append_entry(
                &mut tx,
                NewTrackingEntry {
                    message: message.to_string(),
                    location: entry.location,
                    metadata,
                    ..NewTrackingEntry::for_status(order, current.status, actor.user_uuid)
                },
            )
            .await?;

        tx.commit().await?;

        Ok(appended)
    }
}

#[automock]
#[async_trait]
pub trait TrackingService: Send + Sync {
    /// An order's timeline, oldest entry first.
    async fn get_timeline(
        &self,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<Vec<TrackingEntryRecord>, TrackingServiceError>;

    /// Append a staff or carrier note without changing the order's status.
    async fn add_manual_entry(
        &self,
        actor: Principal,
        order: OrderUuid,
        entry: ManualEntry,
    ) -> Result<TrackingEntryRecord, TrackingServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::{orders::OrdersService, profiles::records::Role},
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn manual_entry_keeps_order_status() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.place_order().await?;
        let seller = ctx.create_principal("seller@example.com", Role::Seller).await;

        let entry = ctx
            .tracking
            .add_manual_entry(
                seller,
                order,
                ManualEntry {
                    message: "Arrived at sorting hub".to_string(),
                    location: Some("Mumbai".to_string()),
                    metadata: Some(json!({ "carrier": "BlueDart" })),
                },
            )
            .await?;

        assert_eq!(entry.status.as_str(), "pending");
        assert_eq!(entry.created_by, Some(seller.user_uuid));

        let timeline = ctx
            .tracking
            .get_timeline(OrderAccess::Owner(ctx.user_uuid), order)
            .await?;

        let messages: Vec<&str> = timeline.iter().map(|e| e.message.as_str()).collect();

        assert_eq!(
            messages,
            vec!["Order placed and awaiting confirmation", "Arrived at sorting hub"]
        );
        assert_eq!(timeline[1].metadata, json!({ "carrier": "BlueDart" }));

        let detail = ctx
            .orders
            .get_order(OrderAccess::Owner(ctx.user_uuid), order)
            .await?;

        assert_eq!(detail.order.status.as_str(), "pending");

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_add_entries() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.place_order().await?;

        let result = ctx
            .tracking
            .add_manual_entry(
                ctx.customer(),
                order,
                ManualEntry {
                    message: "Delivered early".to_string(),
                    location: None,
                    metadata: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(TrackingServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_message_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.place_order().await?;
        let admin = ctx.create_principal("admin@example.com", Role::Admin).await;

        let result = ctx
            .tracking
            .add_manual_entry(
                admin,
                order,
                ManualEntry {
                    message: "   ".to_string(),
                    location: None,
                    metadata: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(TrackingServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn non_object_metadata_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.place_order().await?;
        let admin = ctx.create_principal("admin@example.com", Role::Admin).await;

        let result = ctx
            .tracking
            .add_manual_entry(
                admin,
                order,
                ManualEntry {
                    message: "Scanned".to_string(),
                    location: None,
                    metadata: Some(json!(["not", "an", "object"])),
                },
            )
            .await;

        assert!(
            matches!(result, Err(TrackingServiceError::InvalidMetadata)),
            "expected InvalidMetadata, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn timeline_of_unknown_or_foreign_order_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.place_order().await?;
        let stranger = ctx.create_profile("stranger@example.com", Role::Customer).await;

        for (access, uuid) in [
            (OrderAccess::Owner(stranger), order),
            (OrderAccess::Staff, OrderUuid::new()),
        ] {
            let result = ctx.tracking.get_timeline(access, uuid).await;

            assert!(
                matches!(result, Err(TrackingServiceError::NotFound)),
                "expected NotFound, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn tracking_rows_cannot_be_rewritten() -> TestResult {
        let ctx = TestContext::new().await;
        let order = ctx.place_order().await?;

        let update = sqlx::query("UPDATE order_tracking SET message = 'edited' WHERE order_uuid = $1")
            .bind(order.into_uuid())
            .execute(ctx.db.pool())
            .await;

        let delete = sqlx::query("DELETE FROM order_tracking WHERE order_uuid = $1")
            .bind(order.into_uuid())
            .execute(ctx.db.pool())
            .await;

        assert!(update.is_err(), "update must be rejected");
        assert!(delete.is_err(), "delete must be rejected");

        let timeline = ctx.tracking.get_timeline(OrderAccess::Staff, order).await?;

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].message, "Order placed and awaiting confirmation");

        Ok(())
    }
}
