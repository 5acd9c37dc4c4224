//! Search service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchServiceError {
    #[error("search query is required")]
    InvalidQuery,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
