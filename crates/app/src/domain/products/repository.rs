//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    categories::records::{CategoryRecord, CategoryUuid},
    products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const FEATURED_PRODUCTS_SQL: &str = include_str!("sql/featured_products.sql");
const RECENT_PRODUCTS_SQL: &str = include_str!("sql/recent_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const SUGGEST_PRODUCTS_SQL: &str = include_str!("sql/suggest_products.sql");
const FIND_CANDIDATES_SQL: &str = include_str!("sql/find_candidates.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const UPDATE_STOCK_SQL: &str = include_str!("sql/update_stock.sql");

/// Narrowing applied by [`PgProductsRepository::find_candidates`].
#[derive(Debug, Clone, Default)]
pub(crate) struct CandidateQuery {
    pub(crate) category: Option<CategoryUuid>,
    pub(crate) min_price: Option<Decimal>,
    pub(crate) max_price: Option<Decimal>,

    /// `ILIKE` patterns; a product matches when any pattern matches its
    /// name, description or category name.
    pub(crate) patterns: Vec<String>,
}

/// Lightweight product projection used for name suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProductNameRecord {
    pub(crate) uuid: ProductUuid,
    pub(crate) name: String,
    pub(crate) slug: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category_slug.as_deref())
            .bind(filter.featured)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn featured_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FEATURED_PRODUCTS_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    /// Available products, newest first.
    pub(crate) async fn recent_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(RECENT_PRODUCTS_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
        slug: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        let stock = encode_stock(product.stock)?;

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.category.into_uuid())
            .bind(product.name.trim())
            .bind(slug)
            .bind(product.image.as_deref())
            .bind(product.price)
            .bind(&product.description)
            .bind(stock)
            .bind(product.available)
            .bind(product.featured)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
        slug: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        let stock = encode_stock(update.stock)?;

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.category.into_uuid())
            .bind(update.name.trim())
            .bind(slug)
            .bind(update.image.as_deref())
            .bind(update.price)
            .bind(&update.description)
            .bind(stock)
            .bind(update.available)
            .bind(update.featured)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Available products whose name matches the given `ILIKE` pattern, newest first.
    pub(crate) async fn suggest_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<ProductNameRecord>, sqlx::Error> {
        let rows = query(SUGGEST_PRODUCTS_SQL)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(ProductNameRecord {
                    uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
                    name: row.try_get("name")?,
                    slug: row.try_get("slug")?,
                })
            })
            .collect()
    }

    /// Available products passing the category, price and text filters,
    /// newest first. Each product appears at most once.
    pub(crate) async fn find_candidates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidates: &CandidateQuery,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FIND_CANDIDATES_SQL)
            .bind(candidates.category.map(CategoryUuid::into_uuid))
            .bind(candidates.min_price)
            .bind(candidates.max_price)
            .bind(candidates.patterns.as_slice())
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch a product and hold its row lock until the transaction ends.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Set the remaining stock. A product with none left is marked unavailable.
    pub(crate) async fn update_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        stock: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(encode_stock(stock)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn encode_stock(stock: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(stock).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stock_i32: i32 = row.try_get("stock")?;

        let stock = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category: CategoryRecord {
                uuid: CategoryUuid::from_uuid(row.try_get::<Uuid, _>("category_uuid")?),
                name: row.try_get("category_name")?,
                slug: row.try_get("category_slug")?,
            },
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            image: row.try_get("image")?,
            price: row.try_get("price")?,
            description: row.try_get("description")?,
            stock,
            available: row.try_get("available")?,
            featured: row.try_get("featured")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
