//! Orders Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    clock,
    domain::orders::{
        OrdersServiceError,
        data::OrderSubmission,
        ids::OrderIdGenerator,
        models::{Order, OrderId, OrderStatus},
        stores::OrdersStore,
    },
    notifications::Notifier,
};

#[derive(Clone)]
pub struct BakeryOrdersService {
    store: Arc<dyn OrdersStore>,
    notifier: Arc<dyn Notifier>,
    ids: Arc<OrderIdGenerator>,
}

impl BakeryOrdersService {
    #[must_use]
    pub fn new(store: Arc<dyn OrdersStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            ids: Arc::new(OrderIdGenerator::new()),
        }
    }
}

#[async_trait]
impl OrdersService for BakeryOrdersService {
    #[tracing::instrument(
        name = "orders.service.submit_order",
        skip(self, submission),
        fields(order_id = tracing::field::Empty, item_count = tracing::field::Empty),
        err
    )]
    async fn submit_order(
        &self,
        submission: OrderSubmission,
    ) -> Result<Order, OrdersServiceError> {
        let new_order = submission.validate()?;

        let now = clock::now();
        let order = new_order.into_order(self.ids.next_id(now), now);

        let span = Span::current();

        span.record("order_id", tracing::field::display(&order.id));
        span.record("item_count", order.items.len());

        let order = self.store.save(order).await?;

        info!(order_id = %order.id, "order saved");

        tokio::join!(
            self.notifier.notify_operator(&order),
            self.notifier.notify_customer(&order),
        );

        Ok(order)
    }

    #[tracing::instrument(name = "orders.service.list_orders", skip(self), err)]
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        Ok(self.store.list().await?)
    }

    #[tracing::instrument(
        name = "orders.service.get_order",
        skip(self),
        fields(order_id = %id),
        err
    )]
    async fn get_order(&self, id: &OrderId) -> Result<Order, OrdersServiceError> {
        Ok(self.store.find(id).await?)
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip(self),
        fields(order_id = %id, status = %status),
        err
    )]
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let order = self.store.update_status(id, status, clock::now()).await?;

        info!(order_id = %order.id, status = %order.status, "order status updated");

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate, store and announce a new order.
    ///
    /// Notifications are attempted after the order is stored and never affect
    /// the result.
    async fn submit_order(
        &self,
        submission: OrderSubmission,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve every order, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, id: &OrderId) -> Result<Order, OrdersServiceError>;

    /// Move an order to a new status.
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::orders::{
            ValidationError,
            data::CustomerSubmission,
            errors::OrdersStoreError,
            stores::{MemoryOrdersStore, MockOrdersStore},
        },
        notifications::MockNotifier,
        test::helpers::{sample_order, sample_submission},
    };

    use super::*;

    fn silent_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();

        notifier.expect_notify_operator().returning(|_| ());
        notifier.expect_notify_customer().returning(|_| ());

        notifier
    }

    fn memory_service() -> BakeryOrdersService {
        BakeryOrdersService::new(
            Arc::new(MemoryOrdersStore::new()),
            Arc::new(silent_notifier()),
        )
    }

    #[tokio::test]
    async fn submit_order_stores_pending_order_and_notifies_both() -> TestResult {
        let mut notifier = MockNotifier::new();

        notifier
            .expect_notify_operator()
            .once()
            .withf(|order| order.status == OrderStatus::Pending)
            .returning(|_| ());
        notifier
            .expect_notify_customer()
            .once()
            .withf(|order| order.customer.email == "ada@example.com")
            .returning(|_| ());

        let store = Arc::new(MemoryOrdersStore::new());
        let service = BakeryOrdersService::new(store.clone(), Arc::new(notifier));

        let order = service.submit_order(sample_submission()).await?;

        assert!(order.id.as_str().starts_with(OrderId::PREFIX));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, order.updated_at);
        assert_eq!(store.find(&order.id).await?, order);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_submission_is_not_stored_or_notified() {
        let mut store = MockOrdersStore::new();
        let mut notifier = MockNotifier::new();

        store.expect_save().never();
        notifier.expect_notify_operator().never();
        notifier.expect_notify_customer().never();

        let service = BakeryOrdersService::new(Arc::new(store), Arc::new(notifier));

        let result = service
            .submit_order(OrderSubmission {
                customer: Some(CustomerSubmission {
                    name: None,
                    ..CustomerSubmission::default()
                }),
                ..sample_submission()
            })
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::Validation(ValidationError::MissingField(
                    "customer.name"
                )))
            ),
            "expected missing customer.name, got {result:?}"
        );
    }

    #[tokio::test]
    async fn store_failure_skips_notifications() {
        let mut store = MockOrdersStore::new();
        let mut notifier = MockNotifier::new();

        store
            .expect_save()
            .once()
            .returning(|_| Err(OrdersStoreError::Sql(sqlx::Error::PoolClosed)));
        notifier.expect_notify_operator().never();
        notifier.expect_notify_customer().never();

        let service = BakeryOrdersService::new(Arc::new(store), Arc::new(notifier));

        let result = service.submit_order(sample_submission()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Store(_))),
            "expected Store error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn consecutive_submissions_get_distinct_ids() -> TestResult {
        let service = memory_service();

        let first = service.submit_order(sample_submission()).await?;
        let second = service.submit_order(sample_submission()).await?;

        assert_ne!(first.id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn get_order_maps_missing_to_not_found() {
        let service = memory_service();

        let result = service.get_order(&OrderId::from("ORD-404")).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_orders_passes_through_store_order() -> TestResult {
        let mut store = MockOrdersStore::new();
        let newer = sample_order("ORD-2", "2026-03-01T11:00:00Z")?;
        let older = sample_order("ORD-1", "2026-03-01T10:00:00Z")?;
        let expected = vec![newer, older];
        let returned = expected.clone();

        store
            .expect_list()
            .once()
            .returning(move || Ok(returned.clone()));

        let service = BakeryOrdersService::new(Arc::new(store), Arc::new(silent_notifier()));

        assert_eq!(service.list_orders().await?, expected);

        Ok(())
    }

    #[tokio::test]
    async fn update_status_changes_status_and_advances_updated_at() -> TestResult {
        let service = memory_service();
        let order = service.submit_order(sample_submission()).await?;

        let updated = service
            .update_status(&order.id, OrderStatus::Confirmed)
            .await?;

        assert_eq!(updated.status, OrderStatus::Confirmed);
        assert!(updated.updated_at > order.updated_at);
        assert_eq!(updated.created_at, order.created_at);
        assert_eq!(service.get_order(&order.id).await?, updated);

        Ok(())
    }

    #[tokio::test]
    async fn update_status_unknown_order_is_not_found() {
        let service = memory_service();

        let result = service
            .update_status(&OrderId::from("ORD-404"), OrderStatus::Ready)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
