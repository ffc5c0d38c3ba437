//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartLine, NewCartItem},
            errors::CartsServiceError,
            merge::merge_cart_lines,
            records::{CartItemRecord, CartItemUuid, CartRecord},
            repositories::PgCartItemsRepository,
        },
        profiles::records::ProfileUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: ProfileUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self.items_repository.get_cart_items(tx, user).await?;

        CartRecord::from_items(items).ok_or(CartsServiceError::InvalidData)
    }

    /// Fails unless `quantity` units of the line's product are in stock.
    async fn ensure_in_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLine,
    ) -> Result<(), CartsServiceError> {
        let available = self
            .items_repository
            .get_available_stock(tx, line.product_uuid, line.variant_uuid)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if line.quantity > available {
            return Err(CartsServiceError::OutOfStock { available });
        }

        Ok(())
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: ProfileUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            product_uuid = %item.product_uuid,
            quantity = item.quantity
        ),
        err
    )]
    async fn add_item(
        &self,
        user: ProfileUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let existing = self
            .items_repository
            .get_line_quantity(&mut tx, user, item.product_uuid, item.variant_uuid)
            .await?;

        self.ensure_in_stock(
            &mut tx,
            CartLine {
                product_uuid: item.product_uuid,
                variant_uuid: item.variant_uuid,
                quantity: existing.saturating_add(item.quantity),
            },
        )
        .await?;

        let uuid = self
            .items_repository
            .add_cart_item(&mut tx, user, item)
            .await?;

        let added = self
            .items_repository
            .get_cart_item(&mut tx, user, uuid)
            .await?;

        tx.commit().await?;

        Ok(added)
    }

    async fn update_quantity(
        &self,
        user: ProfileUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<Option<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let line = self
            .items_repository
            .get_cart_item_line(&mut tx, user, item)
            .await?;

        if quantity <= 0 {
            self.items_repository
                .delete_cart_item(&mut tx, user, item)
                .await?;

            tx.commit().await?;

            return Ok(None);
        }

        let quantity = u32::try_from(quantity).map_err(|_| CartsServiceError::InvalidQuantity)?;

        self.ensure_in_stock(&mut tx, CartLine { quantity, ..line })
            .await?;

        self.items_repository
            .update_cart_item_quantity(&mut tx, user, item, quantity)
            .await?;

        let updated = self
            .items_repository
            .get_cart_item(&mut tx, user, item)
            .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    async fn remove_item(
        &self,
        user: ProfileUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, user, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, user: ProfileUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.items_repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        debug!(%user, rows_affected, "cart cleared");

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.merge_guest_cart",
        skip(self, guest),
        fields(user_uuid = %user, guest_lines = guest.len()),
        err
    )]
    async fn merge_guest_cart(
        &self,
        user: ProfileUuid,
        guest: Vec<CartLine>,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let server: Vec<CartLine> = self
            .items_repository
            .get_cart_items(&mut tx, user)
            .await?
            .iter()
            .map(|item| CartLine {
                product_uuid: item.product_uuid,
                variant_uuid: item.variant_uuid,
                quantity: item.quantity,
            })
            .collect();

        for line in merge_cart_lines(&server, &guest) {
            let Some(available) = self
                .items_repository
                .get_available_stock(&mut tx, line.product_uuid, line.variant_uuid)
                .await?
            else {
                debug!(product = %line.product_uuid, "skipping unavailable guest cart line");

                continue;
            };

            let quantity = line.quantity.min(available);

            if quantity == 0 {
                continue;
            }

            self.items_repository
                .put_cart_line(&mut tx, user, CartLine { quantity, ..line })
                .await?;
        }

        let cart = self.load_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart priced against the live catalog.
    async fn get_cart(&self, user: ProfileUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product to the cart, summing with any existing line for it.
    async fn add_item(
        &self,
        user: ProfileUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Set an item's quantity. Zero or less removes the item and returns `None`.
    async fn update_quantity(
        &self,
        user: ProfileUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<Option<CartItemRecord>, CartsServiceError>;

    /// Remove one item from the cart.
    async fn remove_item(&self, user: ProfileUuid, item: CartItemUuid)
    -> Result<(), CartsServiceError>;

    /// Remove every item from the cart.
    async fn clear(&self, user: ProfileUuid) -> Result<(), CartsServiceError>;

    /// Fold a guest cart into the user's cart, limited to what is in stock.
    async fn merge_guest_cart(
        &self,
        user: ProfileUuid,
        guest: Vec<CartLine>,
    ) -> Result<CartRecord, CartsServiceError>;
}
