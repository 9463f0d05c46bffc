//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use bakery_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Store(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
                .brief("Order storage failed")
                .detail(source.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use bakery_app::domain::orders::{OrdersStoreError, ValidationError};

    use super::*;

    #[test]
    fn validation_is_bad_request_naming_the_field() {
        let status = into_status_error(OrdersServiceError::Validation(
            ValidationError::MissingField("customer.phone"),
        ));

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert!(status.brief.contains("customer.phone"));
    }

    #[test]
    fn not_found_is_404() {
        assert_eq!(
            into_status_error(OrdersServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn store_failure_is_500() {
        let status = into_status_error(OrdersServiceError::Store(OrdersStoreError::AlreadyExists));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_failure_detail_carries_database_message() {
        let status = into_status_error(OrdersServiceError::Store(OrdersStoreError::Sql(
            sqlx::Error::Protocol("relation \"orders\" does not exist".to_string()),
        )));

        assert_eq!(
            status.detail.as_deref(),
            Some("storage error: relation \"orders\" does not exist")
        );
    }
}
