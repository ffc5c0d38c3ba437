//! Product Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attar_app::domain::products::records::{ProductRecord, ProductVariantRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sku: Option<String>,

    /// Price in minor currency units
    pub price: u64,
    pub original_price: Option<u64>,
    pub stock: u32,
    pub images: Vec<String>,
    pub category_uuid: Option<Uuid>,
    pub active: bool,
    pub rating: f64,
    pub review_count: u32,
    pub variants: Vec<VariantResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            sku: product.sku,
            price: product.price,
            original_price: product.original_price,
            stock: product.stock,
            images: product.images,
            category_uuid: product.category_uuid,
            active: product.active,
            rating: product.rating,
            review_count: product.review_count,
            variants: product.variants.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,
    pub name: String,
    pub sku: Option<String>,

    /// Overrides the product price when set
    pub price: Option<u64>,
    pub stock: u32,
}

impl From<ProductVariantRecord> for VariantResponse {
    fn from(variant: ProductVariantRecord) -> Self {
        Self {
            uuid: variant.uuid.into(),
            name: variant.name,
            sku: variant.sku,
            price: variant.price,
            stock: variant.stock,
        }
    }
}
