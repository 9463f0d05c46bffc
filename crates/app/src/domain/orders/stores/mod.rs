//! Order stores.
//!
//! Two interchangeable backings sit behind [`OrdersStore`]: the durable
//! [`PgOrdersStore`] and the process-local [`MemoryOrdersStore`].
//! [`FallbackOrdersStore`] routes each call to one of them according to the
//! current [`Connectivity`](crate::database::Connectivity) state.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::orders::{
    errors::OrdersStoreError,
    models::{Order, OrderId, OrderStatus},
};

mod fallback;
mod memory;
mod postgres;

pub use fallback::FallbackOrdersStore;
pub use memory::MemoryOrdersStore;
pub use postgres::PgOrdersStore;

#[automock]
#[async_trait]
pub trait OrdersStore: Send + Sync {
    /// Persist a new order.
    async fn save(&self, order: Order) -> Result<Order, OrdersStoreError>;

    /// Retrieve every stored order.
    async fn list(&self) -> Result<Vec<Order>, OrdersStoreError>;

    /// Retrieve a single order.
    async fn find(&self, id: &OrderId) -> Result<Order, OrdersStoreError>;

    /// Set the status of an order and move `updated_at` past its previous
    /// value, to `at` where possible.
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        at: Timestamp,
    ) -> Result<Order, OrdersStoreError>;
}

/// Sort orders newest-created first, ties broken by id.
pub(crate) fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
