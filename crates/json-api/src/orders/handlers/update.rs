//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bakery_app::domain::orders::{
    OrdersServiceError, ValidationError,
    models::{OrderId, OrderStatus},
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    /// One of pending, confirmed, preparing, ready, delivered, cancelled
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateOrderRequest {
    fn status(&self) -> Result<OrderStatus, ValidationError> {
        self.status
            .as_deref()
            .filter(|status| !status.trim().is_empty())
            .ok_or(ValidationError::MissingField("status"))?
            .parse()
    }
}

/// Order Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderUpdatedResponse {
    pub message: String,

    pub order: OrderResponse,
}

/// Update Order Status Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(id, json, depot),
    fields(order_id = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = OrderId::from(id.into_inner());

    let status = json
        .into_inner()
        .status()
        .map_err(|error| into_status_error(OrdersServiceError::Validation(error)))?;

    let span = tracing::Span::current();

    span.record("order_id", tracing::field::display(&id));
    span.record("status", tracing::field::display(status));

    let order = state
        .app
        .orders
        .update_status(&id, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderUpdatedResponse {
        message: "Order updated successfully".to_string(),
        order: order.into(),
    }))
}
