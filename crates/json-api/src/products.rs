//! Products Handler
//!
//! The catalogue lives in the storefront; this endpoint only says so.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Products placeholder response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductsResponse {
    pub message: String,
    pub note: String,
}

/// Products handler
#[endpoint(tags("products"), summary = "Products placeholder")]
pub(crate) async fn handler() -> Json<ProductsResponse> {
    Json(ProductsResponse {
        message: "Products are managed in frontend localStorage".to_string(),
        note: "Connect to database if needed".to_string(),
    })
}
