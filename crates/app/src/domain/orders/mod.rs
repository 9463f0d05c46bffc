//! Orders

pub mod data;
pub mod errors;
pub mod ids;
pub mod models;
pub mod service;
pub mod stores;

pub use errors::{OrdersServiceError, OrdersStoreError, ValidationError};
pub use service::*;
