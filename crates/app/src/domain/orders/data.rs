//! Order Data

use crate::domain::{
    addresses::records::AddressUuid,
    orders::{records::OrderUuid, snapshots::AddressSnapshot, status::OrderStatus},
};

/// Payment method used when the client does not pick one.
pub const DEFAULT_PAYMENT_METHOD: &str = "cod";

/// Where an order ships or bills to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressChoice {
    /// An address typed in at checkout.
    Inline(AddressSnapshot),

    /// One of the user's saved addresses.
    Saved(AddressUuid),

    /// The user's default address of the relevant kind.
    Default,
}

/// Checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub shipping_address: AddressChoice,

    /// `None` bills to the shipping address.
    pub billing_address: Option<AddressChoice>,
    pub payment_method: Option<String>,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
    pub idempotency_key: Option<String>,
}

/// A staff request to move an order to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub location: Option<String>,
}

/// A staff update to shipment tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingUpdate {
    pub tracking_number: Option<String>,
    pub message: Option<String>,
    pub location: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
