//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attar_app::domain::orders::{
    records::{OrderDetail, OrderItemRecord, OrderRecord, OrderSummary},
    snapshots::{AddressSnapshot, ProductSnapshot},
};

use crate::tracking::responses::TrackingEntryResponse;

/// Order list entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSummaryResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub total_amount: u64,
    pub status: String,
    pub payment_status: String,
    pub item_count: u64,
    pub created_at: String,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        Self {
            uuid: summary.uuid.into(),
            order_number: summary.order_number,
            total_amount: summary.total_amount,
            status: summary.status.to_string(),
            payment_status: summary.payment_status.to_string(),
            item_count: summary.item_count,
            created_at: summary.created_at.to_string(),
        }
    }
}

/// A postal address as stored on the order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderAddressResponse {
    pub full_name: String,
    pub phone: Option<String>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<AddressSnapshot> for OrderAddressResponse {
    fn from(address: AddressSnapshot) -> Self {
        Self {
            full_name: address.full_name,
            phone: address.phone,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,

    /// Amounts are in minor currency units
    pub subtotal: u64,
    pub discount_amount: u64,
    pub tax_amount: u64,
    pub shipping_amount: u64,
    pub total_amount: u64,
    pub coupon_code: Option<String>,
    pub shipping_address: OrderAddressResponse,
    pub billing_address: OrderAddressResponse,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_method: order.payment_method,
            subtotal: order.subtotal,
            discount_amount: order.discount_amount,
            tax_amount: order.tax_amount,
            shipping_amount: order.shipping_amount,
            total_amount: order.total_amount,
            coupon_code: order.coupon_code,
            shipping_address: order.shipping_address.into(),
            billing_address: order.billing_address.into(),
            tracking_number: order.tracking_number,
            notes: order.notes,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// The product as it was sold.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductSnapshotResponse {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub variant_name: Option<String>,
    pub variant_sku: Option<String>,
    pub price: u64,
    pub images: Vec<String>,
}

impl From<ProductSnapshot> for ProductSnapshotResponse {
    fn from(snapshot: ProductSnapshot) -> Self {
        Self {
            name: snapshot.name,
            description: snapshot.description,
            sku: snapshot.sku,
            variant_name: snapshot.variant_name,
            variant_sku: snapshot.variant_sku,
            price: snapshot.price,
            images: snapshot.images,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,

    /// Null once the product has been removed from the catalog
    pub product_uuid: Option<Uuid>,
    pub variant_uuid: Option<Uuid>,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
    pub product: ProductSnapshotResponse,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.map(Into::into),
            variant_uuid: item.variant_uuid.map(Into::into),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
            product: item.product_snapshot.into(),
        }
    }
}

/// An order with its items and timeline.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderDetailResponse {
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
    pub tracking_history: Vec<TrackingEntryResponse>,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            order: detail.order.into(),
            items: detail.items.into_iter().map(Into::into).collect(),
            tracking_history: detail.tracking.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use attar_app::domain::{
        orders::{
            records::{OrderDetail, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            snapshots::{AddressSnapshot, ProductSnapshot},
            status::{OrderStatus, PaymentStatus},
        },
        products::records::ProductUuid,
    };

    use crate::{
        test_helpers::{TEST_TIMESTAMP, TEST_USER_UUID},
        tracking::responses::fixtures::make_entry,
    };

    fn address() -> AddressSnapshot {
        AddressSnapshot {
            full_name: "Zara Khan".to_string(),
            phone: None,
            line1: "14 Chandni Chowk".to_string(),
            line2: None,
            city: "Delhi".to_string(),
            state: "Delhi".to_string(),
            postal_code: "110006".to_string(),
            country: "IN".to_string(),
        }
    }

    pub(crate) fn make_detail(uuid: OrderUuid, status: OrderStatus) -> OrderDetail {
        OrderDetail {
            order: OrderRecord {
                uuid,
                order_number: "ATR-20261018-4F2A9C".to_string(),
                user_uuid: TEST_USER_UUID,
                status,
                payment_status: PaymentStatus::Pending,
                payment_method: "cod".to_string(),
                subtotal: 80_00,
                discount_amount: 0,
                tax_amount: 14_40,
                shipping_amount: 50_00,
                total_amount: 144_40,
                coupon_code: None,
                shipping_address: address(),
                billing_address: address(),
                tracking_number: None,
                notes: None,
                created_at: TEST_TIMESTAMP,
                updated_at: TEST_TIMESTAMP,
            },
            items: vec![OrderItemRecord {
                uuid: OrderItemUuid::new(),
                order_uuid: uuid,
                product_uuid: Some(ProductUuid::new()),
                variant_uuid: None,
                quantity: 2,
                unit_price: 40_00,
                total_price: 80_00,
                product_snapshot: ProductSnapshot {
                    name: "Shamama".to_string(),
                    description: None,
                    sku: None,
                    variant_name: None,
                    variant_sku: None,
                    price: 40_00,
                    images: Vec::new(),
                },
                created_at: TEST_TIMESTAMP,
            }],
            tracking: vec![make_entry(uuid, OrderStatus::Pending)],
        }
    }
}
