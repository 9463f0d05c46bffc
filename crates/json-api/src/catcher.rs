//! JSON error bodies

use salvo::{http::ResBody, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Short description of what failed
    pub error: String,

    /// Underlying cause, when one is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Render every error response as JSON, whatever the client accepts.
///
/// Responses a handler already gave a body are left alone.
#[handler]
pub(crate) async fn json_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let body = match &res.body {
        ResBody::Error(error) => ErrorResponse {
            error: error.brief.clone(),
            message: error.detail.clone(),
        },
        ResBody::None if status == StatusCode::NOT_FOUND => ErrorResponse {
            error: "Route not found".to_string(),
            message: None,
        },
        ResBody::None => ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            message: None,
        },
        _ => return,
    };

    res.status_code(status).render(Json(body));
    ctrl.skip_rest();
}
