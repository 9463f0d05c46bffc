//! Order store that prefers the database and falls back to memory.

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::time;
use tracing::warn;

use crate::{
    database::Connectivity,
    domain::orders::{
        errors::OrdersStoreError,
        models::{Order, OrderId, OrderStatus},
        stores::{MemoryOrdersStore, OrdersStore, sort_newest_first},
    },
};

/// Routes every call to the durable store while it is reachable, and to the
/// in-memory store otherwise.
///
/// A durable call that errors or overruns `timeout` is retried once against
/// memory. Connection failures also flip `connectivity` to disconnected so
/// later calls skip the database until the health monitor restores it.
/// "Not found" from the durable store is an answer, not a failure.
pub struct FallbackOrdersStore {
    durable: Option<Arc<dyn OrdersStore>>,
    memory: Arc<MemoryOrdersStore>,
    connectivity: Connectivity,
    timeout: Duration,
}

impl FallbackOrdersStore {
    #[must_use]
    pub fn new(
        durable: Arc<dyn OrdersStore>,
        memory: Arc<MemoryOrdersStore>,
        connectivity: Connectivity,
        timeout: Duration,
    ) -> Self {
        Self {
            durable: Some(durable),
            memory,
            connectivity,
            timeout,
        }
    }

    /// A store with no durable backing at all.
    #[must_use]
    pub fn memory_only(memory: Arc<MemoryOrdersStore>) -> Self {
        Self {
            durable: None,
            memory,
            connectivity: Connectivity::new(),
            timeout: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Run `call` against the durable store if it should be tried.
    ///
    /// Returns `None` when the caller should use memory instead.
    async fn route<T, F, Fut>(
        &self,
        operation: &'static str,
        call: F,
    ) -> Option<Result<T, OrdersStoreError>>
    where
        F: FnOnce(Arc<dyn OrdersStore>) -> Fut,
        Fut: Future<Output = Result<T, OrdersStoreError>>,
    {
        let durable = self.durable.as_ref()?;

        if !self.connectivity.is_connected() {
            return None;
        }

        let error = match time::timeout(self.timeout, call(Arc::clone(durable))).await {
            Ok(Ok(value)) => return Some(Ok(value)),
            Ok(Err(OrdersStoreError::NotFound)) => return Some(Err(OrdersStoreError::NotFound)),
            Ok(Err(error)) => error,
            Err(_elapsed) => OrdersStoreError::Timeout(self.timeout),
        };

        if error.is_connection_failure() {
            self.connectivity.disconnected();
        }

        warn!(
            operation,
            error = %error,
            "durable order store failed, falling back to memory"
        );

        None
    }
}

#[async_trait]
impl OrdersStore for FallbackOrdersStore {
    async fn save(&self, order: Order) -> Result<Order, OrdersStoreError> {
        let durable = self
            .route("save", |store| {
                let order = order.clone();
                async move { store.save(order).await }
            })
            .await;

        match durable {
            Some(result) => result,
            None => self.memory.save(order).await,
        }
    }

    async fn list(&self) -> Result<Vec<Order>, OrdersStoreError> {
        let durable = self
            .route("list", |store| async move { store.list().await })
            .await;

        let mut orders = match durable {
            Some(result) => result?,
            None => self.memory.list().await?,
        };

        sort_newest_first(&mut orders);

        Ok(orders)
    }

    async fn find(&self, id: &OrderId) -> Result<Order, OrdersStoreError> {
        let durable = self
            .route("find", |store| {
                let id = id.clone();
                async move { store.find(&id).await }
            })
            .await;

        match durable {
            Some(result) => result,
            None => self.memory.find(id).await,
        }
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        at: Timestamp,
    ) -> Result<Order, OrdersStoreError> {
        let durable = self
            .route("update_status", |store| {
                let id = id.clone();
                async move { store.update_status(&id, status, at).await }
            })
            .await;

        match durable {
            Some(result) => result,
            None => self.memory.update_status(id, status, at).await,
        }
    }
}
