//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::repository::PgCategoriesRepository,
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        slugs::resolve_slug,
    },
};

/// Number of products returned by [`ProductsService::featured_products`].
pub const FEATURED_PRODUCTS_LIMIT: i64 = 8;

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    categories: PgCategoriesRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            categories: PgCategoriesRepository::new(),
        }
    }
}

fn validated_slug(name: &str, slug: Option<String>) -> Result<String, ProductsServiceError> {
    if name.trim().is_empty() {
        return Err(ProductsServiceError::MissingRequiredData);
    }

    let slug = resolve_slug(slug, name);

    if slug.is_empty() {
        return Err(ProductsServiceError::InvalidData);
    }

    Ok(slug)
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn featured_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let products = self
            .repository
            .featured_products(&mut tx, FEATURED_PRODUCTS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn products_by_category(
        &self,
        category_slug: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let category = self
            .categories
            .find_category_by_slug(&mut tx, category_slug)
            .await?
            .ok_or(ProductsServiceError::CategoryNotFound)?;

        let filter = ProductFilter {
            category_slug: Some(category.slug),
            featured: None,
        };

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let slug = validated_slug(&product.name, product.slug.clone())?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, &product, &slug)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let slug = validated_slug(&update.name, update.slug.clone())?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update, &slug)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves available products, newest first.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves the newest available featured products.
    async fn featured_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves available products in the category with the given slug.
    async fn products_by_category(
        &self,
        category_slug: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the details of the product with the given UUID.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::categories::records::CategoryUuid,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_product_with_category() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;

        let product = ctx
            .products
            .create_product(helpers::new_product(&category, "Royal Honey", 500))
            .await?;

        assert_eq!(product.name, "Royal Honey");
        assert_eq!(product.slug, "royal-honey");
        assert_eq!(product.price, Decimal::from(500));
        assert_eq!(product.category, category);
        assert!(product.available);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let mut product = helpers::new_product_in(CategoryUuid::new(), "Orphan", 10);
        product.slug = Some("orphan".to_string());

        let result = ctx.products.create_product(product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;

        helpers::create_product(&ctx, &category, "Royal Honey", 500).await?;

        let result = ctx
            .products
            .create_product(helpers::new_product(&category, "Royal Honey", 450))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_negative_price_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;

        let result = ctx
            .products
            .create_product(helpers::new_product(&category, "Broken Honey", -1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_price_too_large_for_storage_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;

        let result = ctx
            .products
            .create_product(helpers::new_product(&category, "Golden Honey", 100_000_000))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_skips_unavailable_and_filters_featured() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Dates").await?;

        let mut featured = helpers::new_product(&category, "Ajwa Dates", 900);
        featured.featured = true;
        let featured = ctx.products.create_product(featured).await?;

        helpers::create_product(&ctx, &category, "Medjool Dates", 700).await?;

        let mut hidden = helpers::new_product(&category, "Old Dates", 100);
        hidden.available = false;
        ctx.products.create_product(hidden).await?;

        let all = ctx.products.list_products(ProductFilter::default()).await?;

        assert_eq!(all.len(), 2, "unavailable products should be hidden");
        assert!(all.iter().all(|product| product.available));

        let only_featured = ctx
            .products
            .list_products(ProductFilter {
                category_slug: None,
                featured: Some(true),
            })
            .await?;

        assert_eq!(only_featured.len(), 1);
        assert_eq!(only_featured[0].uuid, featured.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Nuts").await?;

        let older = helpers::create_product(&ctx, &category, "Walnuts", 800).await?;
        let newer = helpers::create_product(&ctx, &category, "Cashew Nuts", 950).await?;

        let products = ctx.products.list_products(ProductFilter::default()).await?;
        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, [newer.uuid, older.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn featured_products_caps_at_limit() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Nuts").await?;

        for index in 0..10 {
            let mut product = helpers::new_product(&category, &format!("Nut Mix {index}"), 100);
            product.featured = true;
            ctx.products.create_product(product).await?;
        }

        let featured = ctx.products.featured_products().await?;

        assert_eq!(featured.len(), 8);

        Ok(())
    }

    #[tokio::test]
    async fn products_by_category_unknown_slug_returns_category_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.products_by_category("missing").await;

        assert!(
            matches!(result, Err(ProductsServiceError::CategoryNotFound)),
            "expected CategoryNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn products_by_category_returns_only_that_category() -> TestResult {
        let ctx = TestContext::new().await;
        let honey = helpers::create_category(&ctx, "Honey").await?;
        let nuts = helpers::create_category(&ctx, "Nuts").await?;

        let royal = helpers::create_product(&ctx, &honey, "Royal Honey", 500).await?;
        helpers::create_product(&ctx, &nuts, "Walnuts", 800).await?;

        let products = ctx.products.products_by_category(&honey.slug).await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].uuid, royal.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_details() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;
        let product = helpers::create_product(&ctx, &category, "Royal Honey", 500).await?;

        let updated = ctx
            .products
            .update_product(
                product.uuid,
                ProductUpdate {
                    category: category.uuid,
                    name: "Royal Honey 1kg".to_string(),
                    slug: None,
                    image: Some("products/royal-honey.jpg".to_string()),
                    price: Decimal::new(75050, 2),
                    description: "Raw forest honey".to_string(),
                    stock: 3,
                    available: true,
                    featured: true,
                },
            )
            .await?;

        assert_eq!(updated.uuid, product.uuid);
        assert_eq!(updated.slug, "royal-honey-1kg");
        assert_eq!(updated.price, Decimal::new(75050, 2));
        assert_eq!(updated.stock, 3);
        assert!(updated.featured);
        assert!(updated.updated_at >= product.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;

        let result = ctx
            .products
            .update_product(
                ProductUuid::new(),
                ProductUpdate {
                    category: category.uuid,
                    name: "Ghost".to_string(),
                    slug: None,
                    image: None,
                    price: Decimal::ONE,
                    description: String::new(),
                    stock: 0,
                    available: true,
                    featured: false,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;
        let product = helpers::create_product(&ctx, &category, "Royal Honey", 500).await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
