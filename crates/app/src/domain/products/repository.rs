//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    amounts::{decode_amount, decode_count, encode_amount, encode_count},
    products::{
        data::{NewProduct, NewProductVariant, ProductUpdate},
        records::{ProductRecord, ProductUuid, ProductVariantRecord, ProductVariantUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const RESTOCK_PRODUCT_SQL: &str = include_str!("sql/restock_product.sql");
const RESTOCK_VARIANT_SQL: &str = include_str!("sql/restock_variant.sql");
const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.slug)
            .bind(product.description)
            .bind(product.sku)
            .bind(encode_amount(product.price, "price")?)
            .bind(
                product
                    .original_price
                    .map(|price| encode_amount(price, "original_price"))
                    .transpose()?,
            )
            .bind(encode_count(product.stock, "stock")?)
            .bind(product.images)
            .bind(product.category_uuid)
            .bind(product.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(update.sku)
            .bind(encode_amount(update.price, "price")?)
            .bind(
                update
                    .original_price
                    .map(|price| encode_amount(price, "original_price"))
                    .transpose()?,
            )
            .bind(update.images)
            .bind(update.category_uuid)
            .bind(update.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Adds `quantity` units and returns the new stock level.
    pub(crate) async fn restock(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: Option<ProductVariantUuid>,
        quantity: u32,
    ) -> Result<u32, sqlx::Error> {
        let quantity = encode_count(quantity, "stock")?;

        let stock: i32 = match variant {
            Some(variant) => {
                query_scalar(RESTOCK_VARIANT_SQL)
                    .bind(product.into_uuid())
                    .bind(variant.into_uuid())
                    .bind(quantity)
                    .fetch_one(&mut **tx)
                    .await?
            }
            None => {
                query_scalar(RESTOCK_PRODUCT_SQL)
                    .bind(product.into_uuid())
                    .bind(quantity)
                    .fetch_one(&mut **tx)
                    .await?
            }
        };

        decode_count(stock, "stock")
    }

    pub(crate) async fn list_variants(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductVariantRecord>, sqlx::Error> {
        query_as::<Postgres, ProductVariantRecord>(LIST_VARIANTS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_variant(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: NewProductVariant,
    ) -> Result<ProductVariantRecord, sqlx::Error> {
        query_as::<Postgres, ProductVariantRecord>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(product.into_uuid())
            .bind(variant.name)
            .bind(variant.sku)
            .bind(
                variant
                    .price
                    .map(|price| encode_amount(price, "price"))
                    .transpose()?,
            )
            .bind(encode_count(variant.stock, "stock")?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            sku: row.try_get("sku")?,
            price: decode_amount(row.try_get("price")?, "price")?,
            original_price: row
                .try_get::<Option<i64>, _>("original_price")?
                .map(|price| decode_amount(price, "original_price"))
                .transpose()?,
            stock: decode_count(row.try_get("stock")?, "stock")?,
            images: row.try_get("images")?,
            category_uuid: row.try_get("category_uuid")?,
            active: row.try_get("active")?,
            rating: row.try_get("rating")?,
            review_count: decode_count(row.try_get("review_count")?, "review_count")?,
            variants: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductVariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductVariantUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            sku: row.try_get("sku")?,
            price: row
                .try_get::<Option<i64>, _>("price")?
                .map(|price| decode_amount(price, "price"))
                .transpose()?,
            stock: decode_count(row.try_get("stock")?, "stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
