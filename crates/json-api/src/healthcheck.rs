//! Health and banner handlers

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `OK` while the process serves requests
    pub status: String,

    /// Current server time, RFC 3339
    pub timestamp: String,

    /// `database` or `memory`
    pub storage: String,
}

/// Banner response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BannerResponse {
    pub message: String,
}

/// Healthcheck handler
///
/// Reports liveness and where orders are currently stored. Never touches the
/// database.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Timestamp::now().to_string(),
        storage: state.app.storage_mode().as_str().to_string(),
    }))
}

/// Banner handler
#[endpoint(tags("health"), summary = "Service banner")]
pub(crate) async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Cake Ordering API is running".to_string(),
    })
}
