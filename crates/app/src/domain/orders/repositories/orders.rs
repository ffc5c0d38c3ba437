//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use uuid::Uuid;

use crate::domain::{
    amounts::{decode_amount, encode_amount},
    orders::{
        pricing::OrderTotals,
        records::{OrderRecord, OrderSummary, OrderUuid},
        snapshots::AddressSnapshot,
        status::{OrderStatus, PaymentStatus},
    },
    profiles::records::ProfileUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const FIND_ORDER_BY_IDEMPOTENCY_KEY_SQL: &str =
    include_str!("../sql/find_order_by_idempotency_key.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const SET_TRACKING_NUMBER_SQL: &str = include_str!("../sql/set_tracking_number.sql");

/// Order header as written at checkout.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderRow {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: ProfileUuid,
    pub payment_method: String,
    pub totals: OrderTotals,
    pub coupon_code: Option<String>,
    pub shipping_address: AddressSnapshot,
    pub billing_address: AddressSnapshot,
    pub notes: Option<String>,
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrderRow,
    ) -> Result<OrderRecord, sqlx::Error> {
        let totals = order.totals;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.order_number)
            .bind(order.user_uuid.into_uuid())
            .bind(order.payment_method)
            .bind(encode_amount(totals.subtotal, "subtotal")?)
            .bind(encode_amount(totals.discount_amount, "discount_amount")?)
            .bind(encode_amount(totals.tax_amount, "tax_amount")?)
            .bind(encode_amount(totals.shipping_amount, "shipping_amount")?)
            .bind(encode_amount(totals.total_amount, "total_amount")?)
            .bind(order.coupon_code)
            .bind(Json(order.shipping_address))
            .bind(Json(order.billing_address))
            .bind(order.notes)
            .bind(order.idempotency_key)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an order, restricted to `owner` when given.
    pub(crate) async fn get_order(
        self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        owner: Option<ProfileUuid>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(owner.map(ProfileUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch and row-lock an order for a status or tracking change.
    pub(crate) async fn lock_order(
        self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        self,
        tx: &mut Transaction<'_, Postgres>,
        owner: Option<ProfileUuid>,
    ) -> Result<Vec<OrderSummary>, sqlx::Error> {
        query_as::<Postgres, OrderSummary>(LIST_ORDERS_SQL)
            .bind(owner.map(ProfileUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_by_idempotency_key(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        key: &str,
    ) -> Result<Option<OrderUuid>, sqlx::Error> {
        let uuid: Option<Uuid> = query_scalar(FIND_ORDER_BY_IDEMPOTENCY_KEY_SQL)
            .bind(user.into_uuid())
            .bind(key)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(uuid.map(OrderUuid::from_uuid))
    }

    /// Moves the order from `from` to `to`; affects no rows if its status is no longer `from`.
    pub(crate) async fn update_status(
        self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
        payment_status: Option<PaymentStatus>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(payment_status.map(PaymentStatus::as_str))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_tracking_number(
        self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        tracking_number: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_TRACKING_NUMBER_SQL)
            .bind(order.into_uuid())
            .bind(tracking_number)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn decode_status<T: std::str::FromStr>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            user_uuid: ProfileUuid::from_uuid(row.try_get("user_uuid")?),
            status: decode_status(row, "status")?,
            payment_status: decode_status(row, "payment_status")?,
            payment_method: row.try_get("payment_method")?,
            subtotal: decode_amount(row.try_get("subtotal")?, "subtotal")?,
            discount_amount: decode_amount(row.try_get("discount_amount")?, "discount_amount")?,
            tax_amount: decode_amount(row.try_get("tax_amount")?, "tax_amount")?,
            shipping_amount: decode_amount(row.try_get("shipping_amount")?, "shipping_amount")?,
            total_amount: decode_amount(row.try_get("total_amount")?, "total_amount")?,
            coupon_code: row.try_get("coupon_code")?,
            shipping_address: row
                .try_get::<Json<AddressSnapshot>, _>("shipping_address")?
                .0,
            billing_address: row
                .try_get::<Json<AddressSnapshot>, _>("billing_address")?
                .0,
            tracking_number: row.try_get("tracking_number")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            status: decode_status(row, "status")?,
            payment_status: decode_status(row, "payment_status")?,
            total_amount: decode_amount(row.try_get("total_amount")?, "total_amount")?,
            item_count: decode_amount(row.try_get("item_count")?, "item_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
