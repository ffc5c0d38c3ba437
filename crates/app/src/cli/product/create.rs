use attar_app::domain::products::{
    PgProductsService, ProductsService, data::NewProduct, records::ProductUuid,
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// URL slug, unique among live products
    #[arg(long)]
    slug: String,

    /// Price in minor units
    #[arg(long)]
    price: u64,

    /// Units on hand
    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    sku: Option<String>,

    /// Image URL; repeat for more than one
    #[arg(long = "image")]
    images: Vec<String>,

    /// Create the product hidden from the storefront
    #[arg(long)]
    inactive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let product = PgProductsService::new(db)
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            slug: args.slug,
            description: args.description,
            sku: args.sku,
            price: args.price,
            original_price: None,
            stock: args.stock,
            images: args.images,
            category_uuid: None,
            active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("slug: {}", product.slug);
    println!("stock: {}", product.stock);

    Ok(())
}
