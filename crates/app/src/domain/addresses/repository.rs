//! Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    addresses::{
        data::NewAddress,
        records::{AddressKind, AddressRecord, AddressUuid},
    },
    profiles::records::ProfileUuid,
};

const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");
const GET_ADDRESS_SQL: &str = include_str!("sql/get_address.sql");
const GET_ADDRESS_KIND_SQL: &str = include_str!("sql/get_address_kind.sql");
const GET_DEFAULT_ADDRESS_SQL: &str = include_str!("sql/get_default_address.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const CLEAR_DEFAULT_ADDRESS_SQL: &str = include_str!("sql/clear_default_address.sql");
const SET_DEFAULT_ADDRESS_SQL: &str = include_str!("sql/set_default_address.sql");
const DELETE_ADDRESS_SQL: &str = include_str!("sql/delete_address.sql");

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_addresses(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
    ) -> Result<Vec<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(LIST_ADDRESSES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_address(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        address: AddressUuid,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(GET_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Locks the address row and returns its kind.
    pub(crate) async fn get_address_kind(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        address: AddressUuid,
    ) -> Result<AddressKind, sqlx::Error> {
        let kind: String = query_scalar(GET_ADDRESS_KIND_SQL)
            .bind(address.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        kind.parse().map_err(|e| sqlx::Error::ColumnDecode {
            index: "kind".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn get_default_address(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        kind: AddressKind,
    ) -> Result<Option<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(GET_DEFAULT_ADDRESS_SQL)
            .bind(user.into_uuid())
            .bind(kind.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_address(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(CREATE_ADDRESS_SQL)
            .bind(address.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(address.kind.as_str())
            .bind(address.full_name)
            .bind(address.phone)
            .bind(address.line1)
            .bind(address.line2)
            .bind(address.city)
            .bind(address.state)
            .bind(address.postal_code)
            .bind(address.country)
            .bind(address.is_default)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn clear_default_address(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        kind: AddressKind,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_DEFAULT_ADDRESS_SQL)
            .bind(user.into_uuid())
            .bind(kind.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_default_address(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        address: AddressUuid,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(SET_DEFAULT_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_address(
        self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
        address: AddressUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for AddressRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: ProfileUuid::from_uuid(row.try_get("user_uuid")?),
            kind: kind.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            })?,
            full_name: row.try_get("full_name")?,
            phone: row.try_get("phone")?,
            line1: row.try_get("line1")?,
            line2: row.try_get("line2")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            postal_code: row.try_get("postal_code")?,
            country: row.try_get("country")?,
            is_default: row.try_get("is_default")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
