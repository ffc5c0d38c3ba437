//! Order Records

use jiff::Timestamp;

use crate::{
    auth::Principal,
    domain::{
        orders::{
            snapshots::{AddressSnapshot, ProductSnapshot},
            status::{OrderStatus, PaymentStatus},
        },
        products::records::{ProductUuid, ProductVariantUuid},
        profiles::records::ProfileUuid,
        tracking::records::TrackingEntryRecord,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: ProfileUuid,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub tax_amount: u64,
    pub shipping_amount: u64,
    pub total_amount: u64,
    pub coupon_code: Option<String>,
    pub shipping_address: AddressSnapshot,
    pub billing_address: AddressSnapshot,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,

    /// `None` once the product row has been removed.
    pub product_uuid: Option<ProductUuid>,
    pub variant_uuid: Option<ProductVariantUuid>,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
    pub product_snapshot: ProductSnapshot,
    pub created_at: Timestamp,
}

/// Order list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: u64,
    pub item_count: u64,
    pub created_at: Timestamp,
}

/// An order with its items and timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
    pub tracking: Vec<TrackingEntryRecord>,
}

/// Result of a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlacement {
    pub detail: OrderDetail,

    /// True when an earlier order with the same idempotency key was returned.
    pub replayed: bool,
}

/// A cart line that cannot be fulfilled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall {
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<ProductVariantUuid>,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

/// Which orders a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAccess {
    Owner(ProfileUuid),
    Staff,
}

impl OrderAccess {
    /// The owner filter to apply, if any.
    #[must_use]
    pub const fn owner(self) -> Option<ProfileUuid> {
        match self {
            Self::Owner(user) => Some(user),
            Self::Staff => None,
        }
    }
}

impl From<Principal> for OrderAccess {
    fn from(principal: Principal) -> Self {
        if principal.is_staff() {
            Self::Staff
        } else {
            Self::Owner(principal.user_uuid)
        }
    }
}
