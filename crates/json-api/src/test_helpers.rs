//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use bazaar_app::{
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        orders::MockOrdersService,
        payments::MockPaymentsService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        search::MockSearchService,
    },
};

use crate::{media::MediaUrls, state::State};

pub(crate) const TEST_ADMIN_TOKEN: &str = "test-admin-token";
pub(crate) const TEST_BASE_URL: &str = "http://example.com";

/// Service mocks for one handler test. Any call without a matching
/// expectation fails the test.
#[derive(Default)]
pub(crate) struct TestApp {
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) payments: MockPaymentsService,
    pub(crate) search: MockSearchService,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
            payments: Arc::new(self.payments),
            search: Arc::new(self.search),
        };

        let media = MediaUrls::new(TEST_BASE_URL, "/media/").expect("test media root is valid");

        State::new(app, media, TEST_ADMIN_TOKEN).into_shared()
    }

    /// Serve `route` with the mocks injected as application state.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn make_category(name: &str, slug: &str) -> CategoryRecord {
    CategoryRecord {
        uuid: CategoryUuid::new(),
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

pub(crate) fn make_product(uuid: ProductUuid, name: &str, price: i64) -> ProductRecord {
    ProductRecord {
        uuid,
        category: make_category("Honey", "honey"),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        image: Some("products/honey.jpg".to_string()),
        price: Decimal::new(price, 0),
        description: String::new(),
        stock: 10,
        available: true,
        featured: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
