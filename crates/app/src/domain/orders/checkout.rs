//! Order placement.

use jiff::Timestamp;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::domain::{
    addresses::{records::AddressKind, repository::PgAddressesRepository},
    carts::repositories::PgCartItemsRepository,
    orders::{
        coupons::CouponRejection,
        data::{AddressChoice, DEFAULT_PAYMENT_METHOD, NewOrder},
        errors::OrdersServiceError,
        number::generate_order_number,
        pricing::PricingPolicy,
        records::{OrderItemUuid, OrderPlacement, OrderUuid, StockShortfall},
        repositories::{
            CheckoutLine, NewOrderItem, NewOrderRow, PgCheckoutRepository, PgOrderItemsRepository,
            PgOrdersRepository,
        },
        service::load_order_detail,
        snapshots::{AddressField, AddressSnapshot, ProductSnapshot},
        status::OrderStatus,
    },
    profiles::records::ProfileUuid,
    tracking::{data::NewTrackingEntry, repository::PgTrackingRepository},
};

impl From<&CheckoutLine> for StockShortfall {
    fn from(line: &CheckoutLine) -> Self {
        Self {
            product_uuid: line.product_uuid,
            variant_uuid: line.variant_uuid,
            name: line.name.clone(),
            requested: line.quantity,
            available: line.available,
        }
    }
}

impl NewOrderItem {
    fn from_line(order_uuid: OrderUuid, line: CheckoutLine) -> Option<Self> {
        Some(Self {
            uuid: OrderItemUuid::new(),
            order_uuid,
            product_uuid: line.product_uuid,
            variant_uuid: line.variant_uuid,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.unit_price.checked_mul(u64::from(line.quantity))?,
            snapshot: ProductSnapshot {
                name: line.name,
                description: line.description,
                sku: line.sku,
                variant_name: line.variant_name,
                variant_sku: line.variant_sku,
                price: line.unit_price,
                images: line.images,
            },
        })
    }
}

/// Turns a user's cart into an order inside one transaction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkout {
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    checkout: PgCheckoutRepository,
    addresses: PgAddressesRepository,
    carts: PgCartItemsRepository,
    tracking: PgTrackingRepository,
    policy: PricingPolicy,
}

impl Checkout {
    pub(crate) fn new(policy: PricingPolicy) -> Self {
        Self {
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            checkout: PgCheckoutRepository::new(),
            addresses: PgAddressesRepository::new(),
            carts: PgCartItemsRepository::new(),
            tracking: PgTrackingRepository::new(),
            policy,
        }
    }

    /// Place an order from the user's cart.
    ///
    /// Any error leaves the transaction to be rolled back by the caller, so no partial
    /// order, stock movement or coupon redemption survives a failure.
    pub(crate) async fn place_order(
        self,
        tx: &mut Transaction<'static, Postgres>,
        user: ProfileUuid,
        order: NewOrder,
    ) -> Result<OrderPlacement, OrdersServiceError> {
        self.checkout.lock_cart(tx, user).await?;

        if let Some(key) = order.idempotency_key.as_deref()
            && let Some(existing) = self.orders.find_by_idempotency_key(tx, user, key).await?
        {
            debug!(order = %existing, "replaying order for idempotency key");

            return Ok(OrderPlacement {
                detail: load_order_detail(tx, existing, Some(user)).await?,
                replayed: true,
            });
        }

        let lines = self.checkout.get_checkout_lines(tx, user).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let shipping_address = self
            .resolve_address(tx, user, AddressKind::Shipping, order.shipping_address)
            .await?;

        let billing_address = match order.billing_address {
            Some(choice) => {
                self.resolve_address(tx, user, AddressKind::Billing, choice)
                    .await?
            }
            None => shipping_address.clone(),
        };

        let shortfalls: Vec<StockShortfall> = lines
            .iter()
            .filter(|line| line.quantity > line.available)
            .map(StockShortfall::from)
            .collect();

        if !shortfalls.is_empty() {
            return Err(OrdersServiceError::InsufficientStock(shortfalls));
        }

        let payment_method = order
            .payment_method
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

        if !self
            .checkout
            .payment_method_active(tx, &payment_method)
            .await?
        {
            return Err(OrdersServiceError::InvalidPaymentMethod);
        }

        let subtotal = lines
            .iter()
            .try_fold(0_u64, |subtotal, line| {
                subtotal.checked_add(line.unit_price.checked_mul(u64::from(line.quantity))?)
            })
            .ok_or(OrdersServiceError::InvalidData)?;

        let (coupon_code, discount) = match order
            .coupon_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
        {
            Some(code) => {
                let coupon = self
                    .checkout
                    .lock_coupon(tx, code)
                    .await?
                    .ok_or(OrdersServiceError::InvalidCoupon(CouponRejection::Unknown))?;

                let discount = coupon
                    .discount_for(subtotal, Timestamp::now())
                    .map_err(OrdersServiceError::InvalidCoupon)?;

                self.checkout.redeem_coupon(tx, coupon.uuid).await?;

                (Some(coupon.code), discount)
            }
            None => (None, 0),
        };

        let totals = self
            .policy
            .totals(subtotal, discount)
            .ok_or(OrdersServiceError::InvalidData)?;

        let order_number = generate_order_number(Timestamp::now(), &mut rand::thread_rng());

        let created = self
            .orders
            .create_order(
                tx,
                NewOrderRow {
                    uuid: order.uuid,
                    order_number,
                    user_uuid: user,
                    payment_method,
                    totals,
                    coupon_code,
                    shipping_address,
                    billing_address,
                    notes: order.notes,
                    idempotency_key: order.idempotency_key,
                },
            )
            .await?;

        for line in lines {
            let decremented = self
                .checkout
                .decrement_stock(tx, line.product_uuid, line.variant_uuid, line.quantity)
                .await?;

            if !decremented {
                return Err(OrdersServiceError::InsufficientStock(vec![
                    StockShortfall::from(&line),
                ]));
            }

            let item = NewOrderItem::from_line(created.uuid, line)
                .ok_or(OrdersServiceError::InvalidData)?;

            self.items.create_item(tx, item).await?;
        }

        self.carts.clear_cart(tx, user).await?;

        self.tracking
            .append_entry(
                tx,
                NewTrackingEntry::for_status(created.uuid, OrderStatus::Pending, user),
            )
            .await?;

        Ok(OrderPlacement {
            detail: load_order_detail(tx, created.uuid, Some(user)).await?,
            replayed: false,
        })
    }

    async fn resolve_address(
        self,
        tx: &mut Transaction<'static, Postgres>,
        user: ProfileUuid,
        kind: AddressKind,
        choice: AddressChoice,
    ) -> Result<AddressSnapshot, OrdersServiceError> {
        let missing_address = || OrdersServiceError::InvalidAddress(vec![AddressField::Address]);

        let snapshot = match choice {
            AddressChoice::Inline(snapshot) => snapshot,
            AddressChoice::Saved(address) => {
                match self.addresses.get_address(tx, user, address).await {
                    Ok(address) if address.kind != kind => {
                        return Err(OrdersServiceError::InvalidAddress(vec![AddressField::Kind]));
                    }
                    Ok(address) => AddressSnapshot::from(address),
                    Err(sqlx::Error::RowNotFound) => return Err(missing_address()),
                    Err(error) => return Err(error.into()),
                }
            }
            AddressChoice::Default => self
                .addresses
                .get_default_address(tx, user, kind)
                .await?
                .map(AddressSnapshot::from)
                .ok_or_else(missing_address)?,
        };

        let missing = snapshot.missing_fields();

        if !missing.is_empty() {
            return Err(OrdersServiceError::InvalidAddress(missing));
        }

        Ok(snapshot)
    }
}
