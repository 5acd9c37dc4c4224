use bazaar_app::domain::{
    categories::CategoriesService as _,
    products::{ProductsService as _, data::NewProduct, records::ProductUuid},
};
use clap::Args;
use rust_decimal::Decimal;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Slug of the category to file the product under
    #[arg(long)]
    category_slug: String,

    /// Product display name
    #[arg(long)]
    name: String,

    /// URL slug; derived from the name when omitted
    #[arg(long)]
    slug: Option<String>,

    /// Unit price, e.g. `499.50`
    #[arg(long)]
    price: Decimal,

    #[arg(long, default_value = "")]
    description: String,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Image path relative to the media root
    #[arg(long)]
    image: Option<String>,

    /// Show the product on the storefront front page
    #[arg(long)]
    featured: bool,

    /// Hide the product from listings and search
    #[arg(long)]
    unavailable: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let app = args.database.connect().await?;

    let category = app
        .categories
        .get_category(&args.category_slug)
        .await
        .map_err(|error| format!("failed to find category `{}`: {error}", args.category_slug))?;

    let product = app
        .products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            category: category.uuid,
            name: args.name,
            slug: args.slug,
            image: args.image,
            price: args.price,
            description: args.description,
            stock: args.stock,
            available: !args.unavailable,
            featured: args.featured,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_slug: {}", product.slug);
    println!("category: {}", product.category.name);
    println!("price: {}", product.price);

    Ok(())
}
