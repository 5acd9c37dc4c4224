//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        categories::{
            CategoriesService, CategoriesServiceError,
            data::NewCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        orders::{
            OrdersService,
            data::{NewOrder, NewOrderItem},
            records::{OrderRecord, OrderUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
) -> Result<CategoryRecord, CategoriesServiceError> {
    ctx.categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            slug: None,
        })
        .await
}

/// An available, unfeatured product with some stock and no description.
pub(crate) fn new_product(category: &CategoryRecord, name: &str, price: i64) -> NewProduct {
    new_product_in(category.uuid, name, price)
}

pub(crate) fn new_product_in(category: CategoryUuid, name: &str, price: i64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        category,
        name: name.to_string(),
        slug: None,
        image: None,
        price: Decimal::from(price),
        description: String::new(),
        stock: 10,
        available: true,
        featured: false,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: &CategoryRecord,
    name: &str,
    price: i64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(new_product(category, name, price))
        .await
}

pub(crate) fn new_order(items: &[(ProductUuid, u32)]) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        user: None,
        name: "Rahim Uddin".to_string(),
        email: "rahim@example.com".to_string(),
        phone: "01700000000".to_string(),
        address: "House 12, Road 5, Dhanmondi, Dhaka".to_string(),
        items: items
            .iter()
            .map(|&(product, quantity)| NewOrderItem { product, quantity })
            .collect(),
    }
}

/// Place an order for one jar of honey.
pub(crate) async fn place_order(ctx: &TestContext) -> testresult::TestResult<OrderRecord> {
    let category = create_category(ctx, "Honey").await?;
    let product = create_product(ctx, &category, "Royal Honey", 500).await?;

    let order = ctx
        .orders
        .place_order(new_order(&[(product.uuid, 1)]))
        .await?;

    Ok(order)
}
