//! In-memory order store.

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::{
    clock,
    domain::orders::{
        errors::OrdersStoreError,
        models::{Order, OrderId, OrderStatus},
        stores::OrdersStore,
    },
};

/// Process-local order collection kept in insertion order.
///
/// Nothing stored here survives a restart.
#[derive(Debug, Default)]
pub struct MemoryOrdersStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrdersStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrdersStore for MemoryOrdersStore {
    async fn save(&self, order: Order) -> Result<Order, OrdersStoreError> {
        let mut orders = self.orders.write().await;

        if orders.iter().any(|stored| stored.id == order.id) {
            return Err(OrdersStoreError::AlreadyExists);
        }

        orders.push(order.clone());

        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, OrdersStoreError> {
        Ok(self.orders.read().await.clone())
    }

    async fn find(&self, id: &OrderId) -> Result<Order, OrdersStoreError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|order| order.id == *id)
            .cloned()
            .ok_or(OrdersStoreError::NotFound)
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        at: Timestamp,
    ) -> Result<Order, OrdersStoreError> {
        let mut orders = self.orders.write().await;

        let order = orders
            .iter_mut()
            .find(|order| order.id == *id)
            .ok_or(OrdersStoreError::NotFound)?;

        order.status = status;
        order.updated_at = clock::advance(order.updated_at, at);

        Ok(order.clone())
    }
}
