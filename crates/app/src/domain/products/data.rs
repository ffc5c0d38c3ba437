//! Products Data

use uuid::Uuid;

use crate::domain::products::records::{ProductUuid, ProductVariantUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
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
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: u64,
    pub original_price: Option<u64>,
    pub images: Vec<String>,
    pub category_uuid: Option<Uuid>,
    pub active: bool,
}

/// New Product Variant Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductVariant {
    pub uuid: ProductVariantUuid,
    pub name: String,
    pub sku: Option<String>,
    pub price: Option<u64>,
    pub stock: u32,
}
