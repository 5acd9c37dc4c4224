//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::{
            data::NewCategory, errors::CategoriesServiceError, records::CategoryRecord,
            repository::PgCategoriesRepository,
        },
        slugs::resolve_slug,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let category = self
            .repository
            .find_category_by_slug(&mut tx, slug)
            .await?
            .ok_or(CategoriesServiceError::NotFound)?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let name = category.name.trim();

        if name.is_empty() {
            return Err(CategoriesServiceError::MissingRequiredData);
        }

        let slug = resolve_slug(category.slug, name);

        if slug.is_empty() {
            return Err(CategoriesServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_category(&mut tx, category.uuid, name, &slug)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_category(&self, slug: &str) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_category(&mut tx, slug).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category by slug.
    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a new category, deriving the slug from the name when none is given.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Deletes a category and, by cascade, every product in it.
    async fn delete_category(&self, slug: &str) -> Result<(), CategoriesServiceError>;
}
