use bazaar_app::domain::categories::{
    CategoriesService as _, data::NewCategory, records::CategoryUuid,
};
use clap::Args;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category display name
    #[arg(long)]
    name: String,

    /// URL slug; derived from the name when omitted
    #[arg(long)]
    slug: Option<String>,

    /// Optional category UUID; generated when omitted
    #[arg(long)]
    category_uuid: Option<Uuid>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let app = args.database.connect().await?;

    let category = app
        .categories
        .create_category(NewCategory {
            uuid: args
                .category_uuid
                .map_or_else(CategoryUuid::new, CategoryUuid::from_uuid),
            name: args.name,
            slug: args.slug,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_name: {}", category.name);
    println!("category_slug: {}", category.slug);

    Ok(())
}
