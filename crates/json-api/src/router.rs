//! App Router

use salvo::{
    affix_state::inject,
    catcher::Catcher,
    cors::{AllowOrigin, Cors, CorsHandler},
    http::{
        Method,
        header::{CONTENT_TYPE, HeaderValue},
    },
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::warn;

use bakery_app::context::AppContext;

use crate::{catcher, healthcheck, observability, orders, products, state::State};

const OPENAPI_PATH: &str = "/api-doc/openapi.json";

pub(crate) fn app_router() -> Router {
    Router::new()
        .get(healthcheck::banner)
        .push(Router::with_path("api/health").get(healthcheck::handler))
        .push(
            Router::with_path("api/orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(orders::get::handler)
                        .patch(orders::update::handler),
                ),
        )
        .push(Router::with_path("api/products").get(products::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
}

/// Cross-origin policy for the storefront and admin dashboard.
pub(crate) fn cors(allowed_origins: &[String]) -> CorsHandler {
    let origins = allowed_origins.iter().filter_map(|origin| {
        HeaderValue::from_str(origin.trim())
            .inspect_err(|error| {
                warn!(origin = %origin, error = %error, "ignoring invalid CORS origin");
            })
            .ok()
    });

    Cors::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(vec![Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(vec![CONTENT_TYPE])
        .into_handler()
}

/// The complete HTTP service: middleware, routes, API docs, CORS and JSON
/// error bodies.
pub(crate) fn app_service(app: AppContext, allowed_origins: &[String]) -> Service {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(app_router());

    let doc = OpenApi::new("Bakery Orders API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router(OPENAPI_PATH))
        .push(SwaggerUi::new(OPENAPI_PATH).into_router("docs"));

    Service::new(router)
        .catcher(Catcher::default().hoop(catcher::json_errors))
        .hoop(cors(allowed_origins))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use salvo::{
        http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, LOCATION},
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use bakery_app::{
        context::{AppInitError, AppSettings},
        database::Connectivity,
        domain::orders::{
            BakeryOrdersService, OrdersStoreError,
            stores::{FallbackOrdersStore, MemoryOrdersStore, MockOrdersStore},
        },
        notifications::{
            MailerError, MockMailer, MockNotifier, NotificationDispatcher, OperatorContact,
        },
    };

    use crate::{
        catcher::ErrorResponse,
        healthcheck::HealthResponse,
        orders::{create::OrderSubmittedResponse, models::OrderResponse},
        test_helpers::order_payload,
    };

    use super::*;

    const ORIGIN: &str = "http://localhost:5173";

    fn origins() -> Vec<String> {
        vec![ORIGIN.to_string(), "http://localhost:3000".to_string()]
    }

    fn operator() -> OperatorContact {
        OperatorContact {
            email: "baker@example.com".to_string(),
            name: "Sweet Treats Bakery".to_string(),
            phone: "(555) 123-4567".to_string(),
        }
    }

    fn memory_service() -> Result<Service, AppInitError> {
        let app = AppContext::from_settings(AppSettings {
            database: None,
            smtp: None,
            operator: operator(),
            shop_name: "Sweet Treats Bakery".to_string(),
        })?;

        Ok(app_service(app, &origins()))
    }

    fn quiet_notifier() -> Arc<MockNotifier> {
        let mut notifier = MockNotifier::new();

        notifier.expect_notify_operator().return_const(());
        notifier.expect_notify_customer().return_const(());

        Arc::new(notifier)
    }

    async fn submit(service: &Service, payload: &Value) -> TestResult<OrderSubmittedResponse> {
        let mut res = TestClient::post("http://example.com/api/orders")
            .json(payload)
            .send(service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(res.take_json().await?)
    }

    async fn list(service: &Service) -> TestResult<Vec<OrderResponse>> {
        Ok(TestClient::get("http://example.com/api/orders")
            .send(service)
            .await
            .take_json()
            .await?)
    }

    #[tokio::test]
    async fn submitted_order_can_be_fetched_listed_and_updated() -> TestResult {
        let service = memory_service()?;

        let submitted = submit(&service, &order_payload()).await?;

        assert!(
            submitted.order_id.starts_with("ORD-"),
            "unexpected id {}",
            submitted.order_id
        );

        let mut res = TestClient::get(format!(
            "http://example.com/api/orders/{}",
            submitted.order_id
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let order: Value = res.take_json().await?;
        let payload = order_payload();
        let mut expected_items = payload["items"].clone();
        expected_items[0]["id"] = json!("7");

        assert_eq!(order["status"], "pending");
        assert_eq!(order["createdAt"], order["updatedAt"]);
        assert_eq!(order["customer"], payload["customer"]);
        assert_eq!(order["items"], expected_items);
        assert_eq!(order["total"], payload["total"]);
        assert_eq!(order["deliveryDate"], payload["deliveryDate"]);
        assert_eq!(order["notes"], payload["notes"]);

        let mut res = TestClient::patch(format!(
            "http://example.com/api/orders/{}",
            submitted.order_id
        ))
        .json(&json!({"status": "ready"}))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let updated: Value = res.take_json().await?;

        assert_eq!(updated["message"], "Order updated successfully");
        assert_eq!(updated["order"]["status"], "ready");
        assert_eq!(updated["order"]["createdAt"], order["createdAt"]);
        assert_ne!(updated["order"]["updatedAt"], order["updatedAt"]);

        let listed = list(&service).await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|order| order.status.as_str()), Some("ready"));

        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first() -> TestResult {
        let service = memory_service()?;

        let first = submit(&service, &order_payload()).await?;
        let second = submit(&service, &order_payload()).await?;

        let ids: Vec<String> = list(&service)
            .await?
            .into_iter()
            .map(|order| order.id)
            .collect();

        assert_eq!(ids, vec![second.order_id, first.order_id]);

        Ok(())
    }

    #[tokio::test]
    async fn incomplete_submission_is_rejected_and_not_stored() -> TestResult {
        let service = memory_service()?;
        let mut payload = order_payload();

        if let Some(customer) = payload["customer"].as_object_mut() {
            customer.remove("phone");
        }

        let res = TestClient::post("http://example.com/api/orders")
            .json(&payload)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(list(&service).await?.is_empty(), "nothing should be stored");

        Ok(())
    }

    #[tokio::test]
    async fn empty_items_are_rejected() -> TestResult {
        let service = memory_service()?;
        let mut payload = order_payload();
        payload["items"] = json!([]);

        let res = TestClient::post("http://example.com/api/orders")
            .json(&payload)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_returns_404() -> TestResult {
        let service = memory_service()?;

        let res = TestClient::get("http://example.com/api/orders/ORD-404")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let res = TestClient::patch("http://example.com/api/orders/ORD-404")
            .json(&json!({"status": "confirmed"}))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_leaves_order_unchanged() -> TestResult {
        let service = memory_service()?;
        let submitted = submit(&service, &order_payload()).await?;

        let res = TestClient::patch(format!(
            "http://example.com/api/orders/{}",
            submitted.order_id
        ))
        .json(&json!({"status": "baking"}))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let listed = list(&service).await?;

        assert_eq!(listed.first().map(|order| order.status.as_str()), Some("pending"));

        Ok(())
    }

    #[tokio::test]
    async fn health_reports_memory_storage() -> TestResult {
        let service = memory_service()?;

        let health: HealthResponse = TestClient::get("http://example.com/api/health")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(health.status, "OK");
        assert_eq!(health.storage, "memory");

        Ok(())
    }

    #[tokio::test]
    async fn banner_and_products_placeholder_are_served() -> TestResult {
        let service = memory_service()?;

        let banner: Value = TestClient::get("http://example.com/")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(banner["message"], "Cake Ordering API is running");

        let res = TestClient::get("http://example.com/api/products")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn trailing_slash_is_ignored() -> TestResult {
        let service = memory_service()?;

        let res = TestClient::get("http://example.com/api/orders/")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn openapi_document_is_served() -> TestResult {
        let service = memory_service()?;

        let doc: Value = TestClient::get("http://example.com/api-doc/openapi.json")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(doc["info"]["title"], "Bakery Orders API");
        assert!(
            doc["paths"].get("/api/orders").is_some(),
            "orders path should be documented"
        );

        Ok(())
    }

    #[tokio::test]
    async fn allowed_origin_receives_cors_headers() -> TestResult {
        let service = memory_service()?;

        let res = TestClient::options("http://example.com/api/orders")
            .add_header("origin", ORIGIN, true)
            .add_header("access-control-request-method", "POST", true)
            .send(&service)
            .await;

        assert_eq!(
            res.headers()
                .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some(ORIGIN)
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_origin_receives_no_cors_headers() -> TestResult {
        let service = memory_service()?;

        let res = TestClient::get("http://example.com/api/orders")
            .add_header("origin", "http://evil.example", true)
            .send(&service)
            .await;

        assert!(
            res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none(),
            "unexpected CORS header for unknown origin"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_database_falls_back_to_memory() -> TestResult {
        let mut durable = MockOrdersStore::new();

        durable.expect_save().once().returning(|_| {
            Err(OrdersStoreError::Unavailable(sqlx::Error::PoolTimedOut))
        });
        durable.expect_list().never();
        durable.expect_find().never();

        let connectivity = Connectivity::new();
        connectivity.connected();

        let store = FallbackOrdersStore::new(
            Arc::new(durable),
            Arc::new(MemoryOrdersStore::new()),
            connectivity,
            Duration::from_millis(200),
        );

        let app = AppContext::from_orders_service(Arc::new(BakeryOrdersService::new(
            Arc::new(store),
            quiet_notifier(),
        )));
        let service = app_service(app, &origins());

        let submitted = submit(&service, &order_payload()).await?;

        let res = TestClient::get(format!(
            "http://example.com/api/orders/{}",
            submitted.order_id
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(list(&service).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn failing_mailer_does_not_fail_submission() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(2)
            .returning(|_| Err(MailerError::Message(lettre::error::Error::MissingFrom)));

        let notifier = NotificationDispatcher::new(
            Some(Arc::new(mailer)),
            operator(),
            "Sweet Treats Bakery",
        );

        let app = AppContext::from_orders_service(Arc::new(BakeryOrdersService::new(
            Arc::new(MemoryOrdersStore::new()),
            Arc::new(notifier),
        )));
        let service = app_service(app, &origins());

        let mut res = TestClient::post("http://example.com/api/orders")
            .json(&order_payload())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(
            res.headers().get(LOCATION).is_some(),
            "location header should be set"
        );

        let body: OrderSubmittedResponse = res.take_json().await?;

        assert_eq!(body.message, "Order submitted successfully");

        Ok(())
    }

    async fn error_body(res: &mut Response) -> TestResult<ErrorResponse> {
        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        assert!(
            content_type.starts_with("application/json"),
            "expected a JSON error body, got {content_type}"
        );

        Ok(res.take_json().await?)
    }

    #[tokio::test]
    async fn validation_errors_are_json_for_any_accept() -> TestResult {
        let service = memory_service()?;
        let mut payload = order_payload();

        if let Some(customer) = payload["customer"].as_object_mut() {
            customer.remove("phone");
        }

        let mut res = TestClient::post("http://example.com/api/orders")
            .add_header("accept", "*/*", true)
            .json(&payload)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            error_body(&mut res).await?.error,
            "missing required field: customer.phone"
        );

        payload = order_payload();
        payload["total"] = json!(0);

        let mut res = TestClient::post("http://example.com/api/orders")
            .add_header("accept", "*/*", true)
            .json(&payload)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            error_body(&mut res).await?.error,
            "missing required field: total"
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_order_is_json_for_any_accept() -> TestResult {
        let service = memory_service()?;

        let mut res = TestClient::get("http://example.com/api/orders/ORD-404")
            .add_header("accept", "*/*", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(error_body(&mut res).await?.error, "Order not found");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_json_route_not_found() -> TestResult {
        let service = memory_service()?;

        let mut res = TestClient::get("http://example.com/api/cakes")
            .add_header("accept", "*/*", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(error_body(&mut res).await?.error, "Route not found");

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_body_carries_database_message() -> TestResult {
        let mut store = MockOrdersStore::new();

        store.expect_save().once().returning(|_| {
            Err(OrdersStoreError::Sql(sqlx::Error::Protocol(
                "relation \"orders\" does not exist".to_string(),
            )))
        });

        let app = AppContext::from_orders_service(Arc::new(BakeryOrdersService::new(
            Arc::new(store),
            quiet_notifier(),
        )));
        let service = app_service(app, &origins());

        let mut res = TestClient::post("http://example.com/api/orders")
            .add_header("accept", "*/*", true)
            .json(&order_payload())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let body = error_body(&mut res).await?;

        assert_eq!(body.error, "Order storage failed");
        assert!(
            body.message
                .as_deref()
                .is_some_and(|message| message.contains("relation \"orders\" does not exist")),
            "message should carry the database error, got {:?}",
            body.message
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_address_is_returned_verbatim() -> TestResult {
        let service = memory_service()?;
        let mut payload = order_payload();
        payload["customer"]["address"] = json!("  ");

        let submitted = submit(&service, &payload).await?;

        let order: Value = TestClient::get(format!(
            "http://example.com/api/orders/{}",
            submitted.order_id
        ))
        .send(&service)
        .await
        .take_json()
        .await?;

        assert_eq!(order["customer"], payload["customer"]);

        Ok(())
    }
}
