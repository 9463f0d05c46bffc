//! `PostgreSQL` order store.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, types::Json};

use crate::domain::orders::{
    errors::OrdersStoreError,
    models::{Customer, Order, OrderId, OrderItem, OrderStatus},
    stores::OrdersStore,
};

const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// Durable order store.
#[derive(Debug, Clone)]
pub struct PgOrdersStore {
    pool: PgPool,
}

impl PgOrdersStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrdersStore for PgOrdersStore {
    async fn save(&self, order: Order) -> Result<Order, OrdersStoreError> {
        let created = query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.id.as_str())
            .bind(Json(&order.customer))
            .bind(Json(&order.items))
            .bind(order.total)
            .bind(order.delivery_date.as_deref())
            .bind(order.notes.as_deref())
            .bind(order.status.as_str())
            .bind(SqlxTimestamp::from(order.created_at))
            .bind(SqlxTimestamp::from(order.updated_at))
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Order>, OrdersStoreError> {
        let orders = query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn find(&self, id: &OrderId) -> Result<Order, OrdersStoreError> {
        let order = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(order)
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        at: Timestamp,
    ) -> Result<Order, OrdersStoreError> {
        let order = query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(id.as_str())
            .bind(status.as_str())
            .bind(SqlxTimestamp::from(at))
            .fetch_one(&self.pool)
            .await?;

        Ok(order)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let Json(customer) = row.try_get::<Json<Customer>, _>("customer")?;
        let Json(items) = row.try_get::<Json<Vec<OrderItem>>, _>("items")?;

        Ok(Self {
            id: OrderId::from(row.try_get::<String, _>("id")?),
            customer,
            items,
            total: row.try_get("total")?,
            delivery_date: row.try_get("delivery_date")?,
            notes: row.try_get("notes")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
