//! Addresses service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        addresses::{
            data::NewAddress,
            errors::AddressesServiceError,
            records::{AddressRecord, AddressUuid},
            repository::PgAddressesRepository,
        },
        profiles::records::ProfileUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgAddressesService {
    db: Db,
    repository: PgAddressesRepository,
}

impl PgAddressesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl AddressesService for PgAddressesService {
    async fn list_addresses(
        &self,
        user: ProfileUuid,
    ) -> Result<Vec<AddressRecord>, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self.repository.list_addresses(&mut tx, user).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn create_address(
        &self,
        user: ProfileUuid,
        mut address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let required = [
            &address.full_name,
            &address.line1,
            &address.city,
            &address.state,
            &address.postal_code,
            &address.country,
        ];

        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AddressesServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let current_default = self
            .repository
            .get_default_address(&mut tx, user, address.kind)
            .await?;

        // The first address of a kind becomes the default.
        if current_default.is_none() {
            address.is_default = true;
        } else if address.is_default {
            self.repository
                .clear_default_address(&mut tx, user, address.kind)
                .await?;
        }

        let created = self
            .repository
            .create_address(&mut tx, user, address)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn set_default(
        &self,
        user: ProfileUuid,
        address: AddressUuid,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let kind = self
            .repository
            .get_address_kind(&mut tx, user, address)
            .await?;

        self.repository
            .clear_default_address(&mut tx, user, kind)
            .await?;

        let updated = self
            .repository
            .set_default_address(&mut tx, user, address)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_address(
        &self,
        user: ProfileUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_address(&mut tx, user, address)
            .await?;

        if rows_affected == 0 {
            return Err(AddressesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// The user's saved addresses, defaults first within each kind.
    async fn list_addresses(
        &self,
        user: ProfileUuid,
    ) -> Result<Vec<AddressRecord>, AddressesServiceError>;

    /// Save an address. Marking it default demotes the previous default of its kind.
    async fn create_address(
        &self,
        user: ProfileUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Make an address the default for its kind.
    async fn set_default(
        &self,
        user: ProfileUuid,
        address: AddressUuid,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Delete one of the user's addresses. Orders keep their own copy.
    async fn delete_address(
        &self,
        user: ProfileUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{addresses::records::AddressKind, profiles::records::Role},
        test::{TestContext, helpers::new_address},
    };

    use super::*;

    #[tokio::test]
    async fn first_address_of_a_kind_becomes_default() -> TestResult {
        let ctx = TestContext::new().await;

        let shipping = ctx
            .addresses
            .create_address(ctx.user_uuid, new_address(AddressKind::Shipping, false))
            .await?;

        let billing = ctx
            .addresses
            .create_address(ctx.user_uuid, new_address(AddressKind::Billing, false))
            .await?;

        assert!(shipping.is_default);
        assert!(billing.is_default);

        Ok(())
    }

    #[tokio::test]
    async fn new_default_demotes_previous_default() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .addresses
            .create_address(ctx.user_uuid, new_address(AddressKind::Shipping, true))
            .await?;

        let second = ctx
            .addresses
            .create_address(ctx.user_uuid, new_address(AddressKind::Shipping, true))
            .await?;

        let addresses = ctx.addresses.list_addresses(ctx.user_uuid).await?;

        let defaults: Vec<AddressUuid> = addresses
            .iter()
            .filter(|address| address.is_default)
            .map(|address| address.uuid)
            .collect();

        assert_eq!(defaults, vec![second.uuid]);
        assert!(addresses.iter().any(|a| a.uuid == first.uuid && !a.is_default));

        Ok(())
    }

    #[tokio::test]
    async fn set_default_switches_default() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .addresses
            .create_address(ctx.user_uuid, new_address(AddressKind::Shipping, true))
            .await?;

        let second = ctx
            .addresses
            .create_address(ctx.user_uuid, new_address(AddressKind::Shipping, false))
            .await?;

        let updated = ctx.addresses.set_default(ctx.user_uuid, second.uuid).await?;

        assert!(updated.is_default);

        let addresses = ctx.addresses.list_addresses(ctx.user_uuid).await?;

        assert!(addresses.iter().any(|a| a.uuid == first.uuid && !a.is_default));

        Ok(())
    }

    #[tokio::test]
    async fn blank_required_field_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .addresses
            .create_address(
                ctx.user_uuid,
                NewAddress {
                    city: " ".to_string(),
                    ..new_address(AddressKind::Shipping, false)
                },
            )
            .await;

        assert!(
            matches!(result, Err(AddressesServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn other_users_address_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_profile("other@example.com", Role::Customer).await;

        let address = ctx
            .addresses
            .create_address(ctx.user_uuid, new_address(AddressKind::Shipping, false))
            .await?;

        let set = ctx.addresses.set_default(other, address.uuid).await;
        let delete = ctx.addresses.delete_address(other, address.uuid).await;

        assert!(
            matches!(set, Err(AddressesServiceError::NotFound)),
            "expected NotFound, got {set:?}"
        );
        assert!(
            matches!(delete, Err(AddressesServiceError::NotFound)),
            "expected NotFound, got {delete:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_address_removes_it() -> TestResult {
        let ctx = TestContext::new().await;

        let address = ctx
            .addresses
            .create_address(ctx.user_uuid, new_address(AddressKind::Billing, false))
            .await?;

        ctx.addresses
            .delete_address(ctx.user_uuid, address.uuid)
            .await?;

        assert!(ctx.addresses.list_addresses(ctx.user_uuid).await?.is_empty());

        Ok(())
    }
}
