//! Categories Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::categories::records::{CategoryCountRecord, CategoryRecord, CategoryUuid};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const FIND_CATEGORY_BY_SLUG_SQL: &str = include_str!("sql/find_category_by_slug.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const POPULAR_CATEGORIES_SQL: &str = include_str!("sql/popular_categories.sql");
const SUGGEST_CATEGORIES_SQL: &str = include_str!("sql/suggest_categories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_category_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(FIND_CATEGORY_BY_SLUG_SQL)
            .bind(slug)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        name: &str,
        slug: &str,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(slug)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Categories ordered by how many products they hold, largest first.
    pub(crate) async fn popular_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<CategoryCountRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryCountRecord>(POPULAR_CATEGORIES_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    /// Categories whose name matches the given `ILIKE` pattern.
    pub(crate) async fn suggest_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(SUGGEST_CATEGORIES_SQL)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryCountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let product_count: i64 = row.try_get("product_count")?;

        let product_count =
            u64::try_from(product_count).map_err(|e| sqlx::Error::ColumnDecode {
                index: "product_count".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            category: CategoryRecord::from_row(row)?,
            product_count,
        })
    }
}
