use attar_app::domain::products::{
    PgProductsService, ProductsService,
    records::{ProductUuid, ProductVariantUuid},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RestockArgs {
    #[arg(long)]
    product_uuid: Uuid,

    /// Restock a single variant instead of the base product
    #[arg(long)]
    variant_uuid: Option<Uuid>,

    /// Units to add
    #[arg(long)]
    quantity: u32,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RestockArgs) -> Result<(), String> {
    if args.quantity == 0 {
        return Err("quantity must be positive".to_string());
    }

    let db = crate::cli::connect(&args.database_url).await?;

    let stock = PgProductsService::new(db)
        .restock(
            ProductUuid::from_uuid(args.product_uuid),
            args.variant_uuid.map(ProductVariantUuid::from_uuid),
            args.quantity,
        )
        .await
        .map_err(|error| format!("failed to restock: {error}"))?;

    println!("stock: {stock}");

    Ok(())
}
