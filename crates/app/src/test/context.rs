//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        categories::PgCategoriesService, orders::PgOrdersService, payments::PgPaymentsService,
        products::PgProductsService, search::PgSearchService,
    },
};

use super::db::TestDb;

/// Postgres-backed services over a fresh database.
pub(crate) struct TestContext {
    _db: TestDb,
    pub(crate) categories: PgCategoriesService,
    pub(crate) products: PgProductsService,
    pub(crate) orders: PgOrdersService,
    pub(crate) payments: PgPaymentsService,
    pub(crate) search: PgSearchService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            categories: PgCategoriesService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            payments: PgPaymentsService::new(db.clone()),
            search: PgSearchService::new(db),
            _db: test_db,
        }
    }
}
