//! Cart Data

use crate::domain::{
    carts::records::CartItemUuid,
    products::records::{ProductUuid, ProductVariantUuid},
};

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<ProductVariantUuid>,
    pub quantity: u32,
}

/// A product/variant and quantity, without identity.
///
/// Used for guest carts held by the client before login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<ProductVariantUuid>,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn same_line(&self, other: &Self) -> bool {
        self.product_uuid == other.product_uuid && self.variant_uuid == other.variant_uuid
    }
}
