//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query};
use uuid::Uuid;

use crate::domain::{
    orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    products::records::{ProductRecord, ProductUuid},
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
        price: Decimal,
        quantity: u32,
    ) -> Result<OrderItemUuid, sqlx::Error> {
        let quantity = i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let item = OrderItemUuid::new();

        query(CREATE_ORDER_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(price)
            .bind(quantity)
            .execute(&mut **tx)
            .await?;

        Ok(item)
    }

    /// Items of the given orders, each paired with the order it belongs to,
    /// in the order they were added.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<(OrderUuid, OrderItemRecord)>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        let rows = query(GET_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                let order = OrderUuid::from_uuid(row.try_get("item_order_uuid")?);

                Ok((order, OrderItemRecord::from_row(row)?))
            })
            .collect()
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("item_quantity")?;

        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "item_quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("item_uuid")?),
            product: ProductRecord::from_row(row)?,
            price: row.try_get("item_price")?,
            quantity,
            created_at: row
                .try_get::<SqlxTimestamp, _>("item_created_at")?
                .to_jiff(),
        })
    }
}
