//! Orders errors.

use std::time::Duration;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Rejected order input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unknown order status: {0:?}")]
    UnknownStatus(String),
}

#[derive(Debug, Error)]
pub enum OrdersStoreError {
    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("durable store unavailable: {0}")]
    Unavailable(#[source] Error),

    #[error("durable store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("storage error: {0}")]
    Sql(#[source] Error),
}

impl OrdersStoreError {
    /// Whether the error means the durable store cannot currently be reached.
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}

impl From<Error> for OrdersStoreError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            Error::Io(_) | Error::Tls(_) | Error::PoolTimedOut | Error::PoolClosed => {
                Self::Unavailable(error)
            }
            _ => match error.as_database_error().map(DatabaseError::kind) {
                Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
                Some(_) | None => Self::Sql(error),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("order not found")]
    NotFound,

    #[error("order storage failed: {0}")]
    Store(#[source] OrdersStoreError),
}

impl From<OrdersStoreError> for OrdersServiceError {
    fn from(error: OrdersStoreError) -> Self {
        match error {
            OrdersStoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}
