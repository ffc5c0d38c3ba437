//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::products::records::{ProductUuid, ProductVariantUuid},
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// A user's cart, priced against the live catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartRecord {
    pub items: Vec<CartItemRecord>,
    pub subtotal: u64,
    pub item_count: u64,
}

impl CartRecord {
    /// Totals the given items. Returns `None` if the subtotal overflows.
    #[must_use]
    pub fn from_items(items: Vec<CartItemRecord>) -> Option<Self> {
        let mut subtotal: u64 = 0;
        let mut item_count: u64 = 0;

        for item in &items {
            subtotal = subtotal.checked_add(item.line_total()?)?;
            item_count += u64::from(item.quantity);
        }

        Some(Self {
            items,
            subtotal,
            item_count,
        })
    }
}

/// CartItem Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<ProductVariantUuid>,
    pub name: String,
    pub variant_name: Option<String>,
    pub image: Option<String>,

    /// Live price: the variant override when present, otherwise the product price.
    pub unit_price: u64,
    pub quantity: u32,

    /// Live stock; zero when the product is inactive or deleted.
    pub available: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }
}
