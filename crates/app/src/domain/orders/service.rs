//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        orders::{
            checkout::Checkout,
            data::{NewOrder, StatusChange, TrackingUpdate},
            errors::OrdersServiceError,
            pricing::PricingPolicy,
            records::{OrderAccess, OrderDetail, OrderPlacement, OrderSummary, OrderUuid},
            repositories::{PgCheckoutRepository, PgOrderItemsRepository, PgOrdersRepository},
            status::{OrderStatus, PaymentStatus},
        },
        profiles::records::ProfileUuid,
        tracking::{data::NewTrackingEntry, repository::PgTrackingRepository},
    },
};

/// Load an order with its items and timeline, restricted to `owner` when given.
pub(crate) async fn load_order_detail(
    tx: &mut Transaction<'_, Postgres>,
    order: OrderUuid,
    owner: Option<ProfileUuid>,
) -> Result<OrderDetail, sqlx::Error> {
    let record = PgOrdersRepository::new().get_order(tx, order, owner).await?;
    let items = PgOrderItemsRepository::new().list_items(tx, order).await?;
    let tracking = PgTrackingRepository::new().list_entries(tx, order).await?;

    Ok(OrderDetail {
        order: record,
        items,
        tracking,
    })
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    checkout_repository: PgCheckoutRepository,
    tracking_repository: PgTrackingRepository,
    checkout: Checkout,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, policy: PricingPolicy) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            checkout_repository: PgCheckoutRepository::new(),
            tracking_repository: PgTrackingRepository::new(),
            checkout: Checkout::new(policy),
        }
    }

    /// Put the units of a cancelled or refunded order back into stock.
    async fn restore_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        let mut items = self.items_repository.list_items(tx, order).await?;

        // Checkout locks every product, then every variant, each by ascending uuid.
        items.sort_by_key(|item| {
            (
                item.variant_uuid.is_some(),
                item.variant_uuid,
                item.product_uuid,
            )
        });

        for item in items {
            let variant_removed =
                item.variant_uuid.is_none() && item.product_snapshot.variant_name.is_some();

            let Some(product) = item.product_uuid.filter(|_| !variant_removed) else {
                continue;
            };

            self.checkout_repository
                .restore_stock(tx, product, item.variant_uuid, item.quantity)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(
        &self,
        access: OrderAccess,
    ) -> Result<Vec<OrderSummary>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_orders(&mut tx, access.owner())
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let detail = load_order_detail(&mut tx, order, access.owner()).await?;

        tx.commit().await?;

        Ok(detail)
    }

    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(
            user_uuid = %user,
            order_uuid = %order.uuid,
            has_coupon = order.coupon_code.is_some(),
            has_idempotency_key = order.idempotency_key.is_some()
        ),
        err
    )]
    async fn create_order(
        &self,
        user: ProfileUuid,
        order: NewOrder,
    ) -> Result<OrderPlacement, OrdersServiceError> {
        let checkout = self.checkout;

        let placement = self
            .db
            .with_transaction(move |tx| Box::pin(checkout.place_order(tx, user, order)))
            .await?;

        if !placement.replayed {
            info!(
                order = %placement.detail.order.uuid,
                order_number = %placement.detail.order.order_number,
                total_amount = placement.detail.order.total_amount,
                "order placed"
            );
        }

        Ok(placement)
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip(self, actor, change),
        fields(order_uuid = %order, status = %change.status),
        err
    )]
    async fn update_status(
        &self,
        actor: Principal,
        order: OrderUuid,
        change: StatusChange,
    ) -> Result<OrderDetail, OrdersServiceError> {
        if !actor.is_staff() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let from = self.orders_repository.lock_order(&mut tx, order).await?.status;
        let to = change.status;

        if !from.can_transition_to(to) {
            return Err(OrdersServiceError::InvalidTransition { from, to });
        }

        let payment_status = (to == OrderStatus::Refunded).then_some(PaymentStatus::Refunded);

        let rows_affected = self
            .orders_repository
            .update_status(&mut tx, order, from, to, payment_status)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::Conflict);
        }

        if from.restores_stock(to) {
            self.restore_stock(&mut tx, order).await?;
        }

        self.tracking_repository
            .append_entry(
                &mut tx,
                NewTrackingEntry {
                    location: change.location,
                    ..NewTrackingEntry::for_status(order, to, actor.user_uuid)
                },
            )
            .await?;

        let detail = load_order_detail(&mut tx, order, None).await?;

        tx.commit().await?;

        info!(%order, %from, %to, actor = %actor.user_uuid, "order status changed");

        Ok(detail)
    }

    #[tracing::instrument(
        name = "orders.service.update_tracking",
        skip(self, actor, update),
        fields(order_uuid = %order),
        err
    )]
    async fn update_tracking(
        &self,
        actor: Principal,
        order: OrderUuid,
        update: TrackingUpdate,
    ) -> Result<OrderDetail, OrdersServiceError> {
        if !actor.is_staff() {
            return Err(OrdersServiceError::Forbidden);
        }

        let tracking_number = update
            .tracking_number
            .map(|number| number.trim().to_string())
            .filter(|number| !number.is_empty());

        let message = update
            .message
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
            .or_else(|| {
                tracking_number
                    .as_ref()
                    .map(|number| format!("Tracking number updated to {number}"))
            })
            .ok_or(OrdersServiceError::MissingRequiredData)?;

        let metadata = match update.metadata {
            Some(Value::Object(metadata)) => Value::Object(metadata),
            Some(_) => return Err(OrdersServiceError::InvalidData),
            None => Value::Object(serde_json::Map::new()),
        };

        let mut tx = self.db.begin().await?;

        let current = self.orders_repository.lock_order(&mut tx, order).await?;

        if let Some(number) = tracking_number.as_deref() {
            self.orders_repository
                .set_tracking_number(&mut tx, order, number)
                .await?;
        }

        self.tracking_repository
            .append_entry(
                &mut tx,
                NewTrackingEntry {
                    message,
                    location: update.location,
                    metadata,
                    ..NewTrackingEntry::for_status(order, current.status, actor.user_uuid)
                },
            )
            .await?;

        let detail = load_order_detail(&mut tx, order, None).await?;

        tx.commit().await?;

        Ok(detail)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Order summaries visible to the caller, newest first.
    async fn list_orders(
        &self,
        access: OrderAccess,
    ) -> Result<Vec<OrderSummary>, OrdersServiceError>;

    /// One order with items and timeline. Orders the caller may not see are `NotFound`.
    async fn get_order(
        &self,
        access: OrderAccess,
        order: OrderUuid,
    ) -> Result<OrderDetail, OrdersServiceError>;

    /// Check out the user's cart.
    async fn create_order(
        &self,
        user: ProfileUuid,
        order: NewOrder,
    ) -> Result<OrderPlacement, OrdersServiceError>;

    /// Move an order to a new status and record it on the timeline.
    ///
    /// This is the only path that writes an order's status.
    async fn update_status(
        &self,
        actor: Principal,
        order: OrderUuid,
        change: StatusChange,
    ) -> Result<OrderDetail, OrdersServiceError>;

    /// Set the carrier tracking number and append a timeline entry.
    async fn update_tracking(
        &self,
        actor: Principal,
        order: OrderUuid,
        update: TrackingUpdate,
    ) -> Result<OrderDetail, OrdersServiceError>;
}
