//! Submit Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    observability::record_order_submitted,
    orders::{errors::into_status_error, models::OrderRequest},
    state::State,
};

/// Order Submitted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSubmittedResponse {
    pub message: String,

    /// Assigned order id
    pub order_id: String,
}

/// Submit Order Handler
///
/// Validates and stores the order, then emails the operator and the customer.
/// Email failures never affect the response.
#[endpoint(
    tags("orders"),
    summary = "Submit Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing required field"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(order_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<OrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderSubmittedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .submit_order(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("order_id", tracing::field::display(&order.id));

    record_order_submitted();

    res.add_header(LOCATION, format!("/api/orders/{}", order.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderSubmittedResponse {
        message: "Order submitted successfully".to_string(),
        order_id: order.id.into_string(),
    }))
}
