//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    amounts::{decode_amount, decode_count, encode_amount, encode_count},
    orders::{
        records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        snapshots::ProductSnapshot,
    },
    products::records::{ProductUuid, ProductVariantUuid},
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

/// Order line as written at checkout.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<ProductVariantUuid>,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
    pub snapshot: ProductSnapshot,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_item(
        self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewOrderItem,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.order_uuid.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.variant_uuid.map(ProductVariantUuid::into_uuid))
            .bind(encode_count(item.quantity, "quantity")?)
            .bind(encode_amount(item.unit_price, "unit_price")?)
            .bind(encode_amount(item.total_price, "total_price")?)
            .bind(Json(item.snapshot))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_items(
        self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: row
                .try_get::<Option<Uuid>, _>("product_uuid")?
                .map(ProductUuid::from_uuid),
            variant_uuid: row
                .try_get::<Option<Uuid>, _>("variant_uuid")?
                .map(ProductVariantUuid::from_uuid),
            quantity: decode_count(row.try_get("quantity")?, "quantity")?,
            unit_price: decode_amount(row.try_get("unit_price")?, "unit_price")?,
            total_price: decode_amount(row.try_get("total_price")?, "total_price")?,
            product_snapshot: row
                .try_get::<Json<ProductSnapshot>, _>("product_snapshot")?
                .0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
