//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, NewProductVariant, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid, ProductVariantRecord, ProductVariantUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.repository.get_product(&mut tx, product).await?;
        let variants = self.repository.list_variants(&mut tx, product).await?;

        tx.commit().await?;

        record.variants.extend(variants);

        Ok(record)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, price = product.price),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() || product.slug.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        info!(product = %created.uuid, slug = %created.slug, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if update.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn create_variant(
        &self,
        product: ProductUuid,
        variant: NewProductVariant,
    ) -> Result<ProductVariantRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        // Rejects deleted products, which the foreign key alone would accept.
        self.repository.get_product(&mut tx, product).await?;

        let created = self
            .repository
            .create_variant(&mut tx, product, variant)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.restock",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn restock(
        &self,
        product: ProductUuid,
        variant: Option<ProductVariantUuid>,
        quantity: u32,
    ) -> Result<u32, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let stock = self
            .repository
            .restock(&mut tx, product, variant, quantity)
            .await?;

        tx.commit().await?;

        info!(%product, ?variant, quantity, stock, "stock replenished");

        Ok(stock)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves the active catalog.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product with its variants.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the editable fields of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product. Order history keeps its snapshots.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Adds a variant to an existing product.
    async fn create_variant(
        &self,
        product: ProductUuid,
        variant: NewProductVariant,
    ) -> Result<ProductVariantRecord, ProductsServiceError>;

    /// Adds stock to a product or one of its variants, returning the new level.
    async fn restock(
        &self,
        product: ProductUuid,
        variant: Option<ProductVariantUuid>,
        quantity: u32,
    ) -> Result<u32, ProductsServiceError>;
}
