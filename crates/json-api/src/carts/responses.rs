//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attar_app::domain::carts::records::{CartItemRecord, CartRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,

    /// Sum of line totals at live prices
    pub subtotal: u64,
    pub item_count: u64,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            items: cart.items.into_iter().map(Into::into).collect(),
            subtotal: cart.subtotal,
            item_count: cart.item_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub variant_uuid: Option<Uuid>,
    pub name: String,
    pub variant_name: Option<String>,
    pub image: Option<String>,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,

    /// Units currently in stock
    pub available: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            line_total: item.line_total().unwrap_or(u64::MAX),
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            variant_uuid: item.variant_uuid.map(Into::into),
            name: item.name,
            variant_name: item.variant_name,
            image: item.image,
            unit_price: item.unit_price,
            quantity: item.quantity,
            available: item.available,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use attar_app::domain::{
        carts::records::{CartItemRecord, CartItemUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::TEST_TIMESTAMP;

    pub(crate) fn make_cart_item(uuid: CartItemUuid, quantity: u32) -> CartItemRecord {
        CartItemRecord {
            uuid,
            product_uuid: ProductUuid::new(),
            variant_uuid: None,
            name: "Ruh Gulab".to_string(),
            variant_name: None,
            image: None,
            unit_price: 45_00,
            quantity,
            available: 10,
            created_at: TEST_TIMESTAMP,
            updated_at: TEST_TIMESTAMP,
        }
    }
}
