//! Checkout Repository
//!
//! Row locks, stock movements and coupon redemption used while placing and
//! unwinding orders. Every method expects to run inside the caller's transaction.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    amounts::{decode_amount, decode_count, encode_count},
    orders::coupons::{CouponRecord, CouponUuid},
    products::records::{ProductUuid, ProductVariantUuid},
    profiles::records::ProfileUuid,
};

const LOCK_CART_ITEMS_SQL: &str = include_str!("../sql/lock_cart_items.sql");
const LOCK_CART_PRODUCTS_SQL: &str = include_str!("../sql/lock_cart_products.sql");
const LOCK_CART_VARIANTS_SQL: &str = include_str!("../sql/lock_cart_variants.sql");
const GET_CHECKOUT_LINES_SQL: &str = include_str!("../sql/get_checkout_lines.sql");
const DECREMENT_PRODUCT_STOCK_SQL: &str = include_str!("../sql/decrement_product_stock.sql");
const DECREMENT_VARIANT_STOCK_SQL: &str = include_str!("../sql/decrement_variant_stock.sql");
const RESTORE_PRODUCT_STOCK_SQL: &str = include_str!("../sql/restore_product_stock.sql");
const RESTORE_VARIANT_STOCK_SQL: &str = include_str!("../sql/restore_variant_stock.sql");
const LOCK_COUPON_SQL: &str = include_str!("../sql/lock_coupon.sql");
const REDEEM_COUPON_SQL: &str = include_str!("../sql/redeem_coupon.sql");
const PAYMENT_METHOD_ACTIVE_SQL: &str = include_str!("../sql/payment_method_active.sql");

/// A cart line joined with everything checkout needs from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CheckoutLine {
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<ProductVariantUuid>,
    pub quantity: u32,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub images: Vec<String>,
    pub variant_name: Option<String>,
    pub variant_sku: Option<String>,
    pub unit_price: u64,

    /// Zero for inactive or deleted products.
    pub available: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PgCheckoutRepository;

impl PgCheckoutRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the user's cart lines, then every product and variant they reference.
    ///
    /// Rows are locked in ascending uuid order so concurrent checkouts sharing products
    /// cannot deadlock.
    pub(crate) async fn lock_cart(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
    ) -> Result<(), sqlx::Error> {
        for sql in [LOCK_CART_ITEMS_SQL, LOCK_CART_PRODUCTS_SQL, LOCK_CART_VARIANTS_SQL] {
            query(sql).bind(user.into_uuid()).fetch_all(&mut **tx).await?;
        }

        Ok(())
    }

    pub(crate) async fn get_checkout_lines(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
    ) -> Result<Vec<CheckoutLine>, sqlx::Error> {
        query_as::<Postgres, CheckoutLine>(GET_CHECKOUT_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Take `quantity` units out of stock. Returns `false` if not enough remain.
    pub(crate) async fn decrement_stock(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: Option<ProductVariantUuid>,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let (sql, uuid) = match variant {
            Some(variant) => (DECREMENT_VARIANT_STOCK_SQL, variant.into_uuid()),
            None => (DECREMENT_PRODUCT_STOCK_SQL, product.into_uuid()),
        };

        let rows_affected = query(sql)
            .bind(uuid)
            .bind(encode_count(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    /// Put `quantity` units back into stock.
    pub(crate) async fn restore_stock(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: Option<ProductVariantUuid>,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        let (sql, uuid) = match variant {
            Some(variant) => (RESTORE_VARIANT_STOCK_SQL, variant.into_uuid()),
            None => (RESTORE_PRODUCT_STOCK_SQL, product.into_uuid()),
        };

        query(sql)
            .bind(uuid)
            .bind(encode_count(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Find and row-lock a coupon by case-insensitive code.
    pub(crate) async fn lock_coupon(
        self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LOCK_COUPON_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn redeem_coupon(
        self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<(), sqlx::Error> {
        query(REDEEM_COUPON_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn payment_method_active(
        self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(PAYMENT_METHOD_ACTIVE_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant_uuid: row
                .try_get::<Option<Uuid>, _>("variant_uuid")?
                .map(ProductVariantUuid::from_uuid),
            quantity: decode_count(row.try_get("quantity")?, "quantity")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            sku: row.try_get("sku")?,
            images: row.try_get("images")?,
            variant_name: row.try_get("variant_name")?,
            variant_sku: row.try_get("variant_sku")?,
            unit_price: decode_amount(row.try_get("unit_price")?, "unit_price")?,
            available: decode_count(row.try_get("available")?, "available")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            kind: kind.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            })?,
            value: decode_amount(row.try_get("value")?, "value")?,
            min_subtotal: decode_amount(row.try_get("min_subtotal")?, "min_subtotal")?,
            max_discount: row
                .try_get::<Option<i64>, _>("max_discount")?
                .map(|amount| decode_amount(amount, "max_discount"))
                .transpose()?,
            usage_limit: row
                .try_get::<Option<i32>, _>("usage_limit")?
                .map(|limit| decode_count(limit, "usage_limit"))
                .transpose()?,
            used_count: decode_count(row.try_get("used_count")?, "used_count")?,
            active: row.try_get("active")?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
