//! Product Records

use jiff::Timestamp;
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Variant UUID
pub type ProductVariantUuid = TypedUuid<ProductVariantRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: u64,
    pub original_price: Option<u64>,
    pub stock: u32,
    pub images: Vec<String>,
    pub category_uuid: Option<Uuid>,
    pub active: bool,
    pub rating: f64,
    pub review_count: u32,
    pub variants: Vec<ProductVariantRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Whether the product can currently be bought.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.active && self.deleted_at.is_none()
    }
}

/// Product Variant Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductVariantRecord {
    pub uuid: ProductVariantUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub sku: Option<String>,

    /// Overrides the product price when set.
    pub price: Option<u64>,
    pub stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
