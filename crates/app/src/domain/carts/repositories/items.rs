//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    amounts::{decode_amount, decode_count, encode_count},
    carts::{
        data::{CartLine, NewCartItem},
        records::{CartItemRecord, CartItemUuid},
    },
    products::records::{ProductUuid, ProductVariantUuid},
    profiles::records::ProfileUuid,
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const GET_AVAILABLE_STOCK_SQL: &str = include_str!("../sql/get_available_stock.sql");
const GET_LINE_QUANTITY_SQL: &str = include_str!("../sql/get_line_quantity.sql");
const GET_CART_ITEM_LINE_SQL: &str = include_str!("../sql/get_cart_item_line.sql");
const ADD_CART_ITEM_SQL: &str = include_str!("../sql/add_cart_item.sql");
const PUT_CART_LINE_SQL: &str = include_str!("../sql/put_cart_line.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("../sql/clear_cart.sql");

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// All of the user's items, joined with live price and stock.
    pub(crate) async fn get_cart_items(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(None::<Uuid>)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_item(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(Some(item.into_uuid()))
            .fetch_one(&mut **tx)
            .await
    }

    /// Live stock for a purchasable product or variant; `None` when it cannot be bought.
    pub(crate) async fn get_available_stock(
        self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: Option<ProductVariantUuid>,
    ) -> Result<Option<u32>, sqlx::Error> {
        let available: Option<i32> = query_scalar(GET_AVAILABLE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(variant.map(ProductVariantUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await?;

        available
            .map(|stock| decode_count(stock, "available"))
            .transpose()
    }

    pub(crate) async fn get_line_quantity(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        product: ProductUuid,
        variant: Option<ProductVariantUuid>,
    ) -> Result<u32, sqlx::Error> {
        let quantity: Option<i32> = query_scalar(GET_LINE_QUANTITY_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .bind(variant.map(ProductVariantUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await?;

        quantity.map_or(Ok(0), |quantity| decode_count(quantity, "quantity"))
    }

    /// Locks and returns the line behind one of the user's items.
    pub(crate) async fn get_cart_item_line(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        item: CartItemUuid,
    ) -> Result<CartLine, sqlx::Error> {
        let (product_uuid, variant_uuid, quantity): (Uuid, Option<Uuid>, i32) =
            query_as(GET_CART_ITEM_LINE_SQL)
                .bind(item.into_uuid())
                .bind(user.into_uuid())
                .fetch_one(&mut **tx)
                .await?;

        Ok(CartLine {
            product_uuid: ProductUuid::from_uuid(product_uuid),
            variant_uuid: variant_uuid.map(ProductVariantUuid::from_uuid),
            quantity: decode_count(quantity, "quantity")?,
        })
    }

    /// Inserts the item or adds its quantity to the existing line, returning the line's uuid.
    pub(crate) async fn add_cart_item(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        item: NewCartItem,
    ) -> Result<CartItemUuid, sqlx::Error> {
        let uuid: Uuid = query_scalar(ADD_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.variant_uuid.map(ProductVariantUuid::into_uuid))
            .bind(encode_count(item.quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartItemUuid::from_uuid(uuid))
    }

    /// Sets the quantity of a line, creating it when missing.
    pub(crate) async fn put_cart_line(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        line: CartLine,
    ) -> Result<(), sqlx::Error> {
        query(PUT_CART_LINE_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(line.variant_uuid.map(ProductVariantUuid::into_uuid))
            .bind(encode_count(line.quantity, "quantity")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_cart_item_quantity(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .bind(encode_count(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_item(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant_uuid: row
                .try_get::<Option<Uuid>, _>("variant_uuid")?
                .map(ProductVariantUuid::from_uuid),
            name: row.try_get("name")?,
            variant_name: row.try_get("variant_name")?,
            image: row.try_get("image")?,
            unit_price: decode_amount(row.try_get("unit_price")?, "unit_price")?,
            quantity: decode_count(row.try_get("quantity")?, "quantity")?,
            available: decode_count(row.try_get("available")?, "available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
