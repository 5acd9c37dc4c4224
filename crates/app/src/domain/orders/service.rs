//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

/// Price and remaining stock of a locked product.
#[derive(Debug, Clone, Copy)]
struct LockedProduct {
    price: Decimal,
    stock: u32,
    decremented: bool,
}

fn validate(order: &NewOrder) -> Result<(), OrdersServiceError> {
    if order.items.is_empty() {
        return Err(OrdersServiceError::EmptyOrder);
    }

    if order.items.iter().any(|item| item.quantity == 0) {
        return Err(OrdersServiceError::InvalidQuantity);
    }

    let contact = [&order.name, &order.email, &order.phone, &order.address];

    if contact.iter().any(|field| field.trim().is_empty()) {
        return Err(OrdersServiceError::MissingRequiredData);
    }

    Ok(())
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        validate(&order)?;

        let mut tx = self.db.begin_transaction().await?;

        // Lock in a fixed order so concurrent checkouts cannot deadlock.
        let mut product_uuids: Vec<ProductUuid> =
            order.items.iter().map(|item| item.product).collect();

        product_uuids.sort_unstable();
        product_uuids.dedup();

        let mut locked = FxHashMap::default();

        for product in product_uuids {
            let record = self
                .products_repository
                .lock_product(&mut tx, product)
                .await?
                .ok_or(OrdersServiceError::ProductNotFound)?;

            locked.insert(
                product,
                LockedProduct {
                    price: record.price,
                    stock: record.stock,
                    decremented: false,
                },
            );
        }

        let mut total_price = Decimal::ZERO;
        let mut lines = Vec::with_capacity(order.items.len());

        for item in &order.items {
            let product = locked
                .get_mut(&item.product)
                .ok_or(OrdersServiceError::ProductNotFound)?;

            total_price += product.price * Decimal::from(item.quantity);
            lines.push((item.product, product.price, item.quantity));

            // Short stock is not an error; the line is taken as ordered.
            if product.stock >= item.quantity {
                product.stock -= item.quantity;
                product.decremented = true;
            } else {
                debug!(
                    product = %item.product,
                    stock = product.stock,
                    quantity = item.quantity,
                    "ordered more than in stock"
                );
            }
        }

        self.orders_repository
            .create_order(&mut tx, &order, total_price)
            .await?;

        for (product, price, quantity) in lines {
            self.items_repository
                .create_order_item(&mut tx, order.uuid, product, price, quantity)
                .await?;
        }

        for (product, state) in &locked {
            if state.decremented {
                self.products_repository
                    .update_stock(&mut tx, *product, state.stock)
                    .await?;
            }
        }

        let mut placed = self.orders_repository.get_order(&mut tx, order.uuid).await?;

        placed.items = self
            .items_repository
            .get_order_items(&mut tx, &[order.uuid])
            .await?
            .into_iter()
            .map(|(_, item)| item)
            .collect();

        tx.commit().await?;

        info!(order = %placed.uuid, total_price = %placed.total_price, "order placed");

        Ok(placed)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let mut record = self.orders_repository.get_order(&mut tx, order).await?;

        record.items = self
            .items_repository
            .get_order_items(&mut tx, &[order])
            .await?
            .into_iter()
            .map(|(_, item)| item)
            .collect();

        tx.commit().await?;

        Ok(record)
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let mut orders = self.orders_repository.list_orders(&mut tx).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items: FxHashMap<OrderUuid, Vec<_>> = FxHashMap::default();

        for (order, item) in self.items_repository.get_order_items(&mut tx, &uuids).await? {
            items.entry(order).or_default().push(item);
        }

        tx.commit().await?;

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order in one transaction.
    ///
    /// Each item records the product's current price. The order total is the
    /// sum of `price * quantity`. Stock is decremented for every item it
    /// covers and a product whose stock reaches zero becomes unavailable.
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieves every order with its items, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            orders::data::NewOrderItem,
            products::{ProductsService, data::ProductUpdate},
        },
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn place_order_totals_items_and_decrements_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;

        let mut royal = helpers::new_product(&category, "Royal Honey", 500);
        royal.stock = 10;
        let royal = ctx.products.create_product(royal).await?;

        let mut wild = helpers::new_product(&category, "Wild Honey", 300);
        wild.stock = 5;
        let wild = ctx.products.create_product(wild).await?;

        let order = ctx
            .orders
            .place_order(helpers::new_order(&[(royal.uuid, 2), (wild.uuid, 1)]))
            .await?;

        assert_eq!(order.total_price, Decimal::from(1300));
        assert_eq!(order.items.len(), 2);
        assert!(!order.paid);

        let line_total: Decimal = order.items.iter().map(|item| item.line_total()).sum();
        assert_eq!(line_total, order.total_price);

        let royal = ctx.products.get_product(royal.uuid).await?;
        let wild = ctx.products.get_product(wild.uuid).await?;

        assert_eq!(royal.stock, 8);
        assert_eq!(wild.stock, 4);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_marks_sold_out_products_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Dates").await?;

        let mut dates = helpers::new_product(&category, "Ajwa Dates", 900);
        dates.stock = 2;
        let dates = ctx.products.create_product(dates).await?;

        ctx.orders
            .place_order(helpers::new_order(&[(dates.uuid, 2)]))
            .await?;

        let dates = ctx.products.get_product(dates.uuid).await?;

        assert_eq!(dates.stock, 0);
        assert!(!dates.available);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_leaves_short_stock_untouched() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Nuts").await?;

        let mut walnuts = helpers::new_product(&category, "Walnuts", 800);
        walnuts.stock = 1;
        let walnuts = ctx.products.create_product(walnuts).await?;

        let order = ctx
            .orders
            .place_order(helpers::new_order(&[(walnuts.uuid, 3)]))
            .await?;

        assert_eq!(order.total_price, Decimal::from(2400));

        let walnuts = ctx.products.get_product(walnuts.uuid).await?;

        assert_eq!(walnuts.stock, 1);
        assert!(walnuts.available);

        Ok(())
    }

    #[tokio::test]
    async fn repeated_lines_draw_from_the_same_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Nuts").await?;

        let mut cashews = helpers::new_product(&category, "Cashew Nuts", 950);
        cashews.stock = 3;
        let cashews = ctx.products.create_product(cashews).await?;

        ctx.orders
            .place_order(helpers::new_order(&[(cashews.uuid, 2), (cashews.uuid, 2)]))
            .await?;

        let cashews = ctx.products.get_product(cashews.uuid).await?;

        assert_eq!(cashews.stock, 1, "second line exceeds what the first left");

        Ok(())
    }

    #[tokio::test]
    async fn items_keep_the_price_paid() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;
        let royal = helpers::create_product(&ctx, &category, "Royal Honey", 500).await?;

        let order = ctx
            .orders
            .place_order(helpers::new_order(&[(royal.uuid, 1)]))
            .await?;

        ctx.products
            .update_product(
                royal.uuid,
                ProductUpdate {
                    category: category.uuid,
                    name: royal.name.clone(),
                    slug: Some(royal.slug.clone()),
                    image: None,
                    price: Decimal::from(650),
                    description: String::new(),
                    stock: 10,
                    available: true,
                    featured: false,
                },
            )
            .await?;

        let order = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(order.items[0].price, Decimal::from(500));
        assert_eq!(order.items[0].product.price, Decimal::from(650));
        assert_eq!(order.total_price, Decimal::from(500));

        Ok(())
    }

    #[tokio::test]
    async fn place_order_unknown_product_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;

        let mut royal = helpers::new_product(&category, "Royal Honey", 500);
        royal.stock = 10;
        let royal = ctx.products.create_product(royal).await?;

        let result = ctx
            .orders
            .place_order(helpers::new_order(&[
                (royal.uuid, 1),
                (ProductUuid::new(), 1),
            ]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        assert!(ctx.orders.list_orders().await?.is_empty());
        assert_eq!(ctx.products.get_product(royal.uuid).await?.stock, 10);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_total_too_large_for_storage_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;
        let hamper = helpers::create_product(&ctx, &category, "Honey Hamper", 10_000_000).await?;

        let result = ctx
            .orders
            .place_order(helpers::new_order(&[(hamper.uuid, 10)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        assert!(ctx.orders.list_orders().await?.is_empty());
        assert_eq!(ctx.products.get_product(hamper.uuid).await?.stock, 10);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_without_items_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.place_order(helpers::new_order(&[])).await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyOrder)),
            "expected EmptyOrder, got {result:?}"
        );
    }

    #[tokio::test]
    async fn place_order_zero_quantity_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;
        let royal = helpers::create_product(&ctx, &category, "Royal Honey", 500).await?;

        let result = ctx
            .orders
            .place_order(helpers::new_order(&[(royal.uuid, 0)]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn place_order_blank_contact_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;
        let royal = helpers::create_product(&ctx, &category, "Royal Honey", 500).await?;

        let mut order = helpers::new_order(&[(royal.uuid, 1)]);
        order.address = "  ".to_string();

        let result = ctx.orders.place_order(order).await;

        assert!(
            matches!(result, Err(OrdersServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn place_order_long_phone_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;
        let royal = helpers::create_product(&ctx, &category, "Royal Honey", 500).await?;

        let mut order = helpers::new_order(&[(royal.uuid, 1)]);
        order.phone = "0".repeat(16);

        let result = ctx.orders.place_order(order).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_orders_newest_first_with_items() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Honey").await?;
        let royal = helpers::create_product(&ctx, &category, "Royal Honey", 500).await?;

        let first = ctx
            .orders
            .place_order(helpers::new_order(&[(royal.uuid, 1)]))
            .await?;

        let second = ctx
            .orders
            .place_order(helpers::new_order(&[(royal.uuid, 2)]))
            .await?;

        let orders = ctx.orders.list_orders().await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, [second.uuid, first.uuid]);
        assert_eq!(orders[0].items[0].quantity, 2);
        assert_eq!(orders[1].items[0].quantity, 1);

        Ok(())
    }

    #[test]
    fn item_quantity_is_validated_before_touching_storage() {
        let order = NewOrder {
            uuid: OrderUuid::new(),
            user: None,
            name: "Rahim".to_string(),
            email: "rahim@example.com".to_string(),
            phone: "01700000000".to_string(),
            address: "Dhaka".to_string(),
            items: vec![NewOrderItem {
                product: ProductUuid::new(),
                quantity: 0,
            }],
        };

        assert!(matches!(
            validate(&order),
            Err(OrdersServiceError::InvalidQuantity)
        ));
    }
}
