//! Orders Data

use jiff::Timestamp;

use crate::domain::orders::{
    errors::ValidationError,
    models::{Customer, Order, OrderId, OrderItem, OrderStatus},
};

/// Order payload as submitted by the storefront, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSubmission {
    pub customer: Option<CustomerSubmission>,
    pub items: Option<Vec<OrderItem>>,
    pub total: Option<f64>,
    pub delivery_date: Option<String>,
    pub notes: Option<String>,
}

/// Customer payload as submitted by the storefront, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Validated order data, ready to be stamped and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub delivery_date: Option<String>,
    pub notes: Option<String>,
}

impl OrderSubmission {
    /// Check required fields, first failure wins.
    ///
    /// Order: the customer and its `name`, `email`, `phone`, then a
    /// non-empty `items` list, then a non-zero `total`. A total of exactly
    /// zero is rejected along with a missing one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first field that
    /// is absent, blank or empty.
    pub fn validate(self) -> Result<NewOrder, ValidationError> {
        let customer = self
            .customer
            .ok_or(ValidationError::MissingField("customer"))?;

        let customer = Customer {
            name: required(customer.name, "customer.name")?,
            email: required(customer.email, "customer.email")?,
            phone: required(customer.phone, "customer.phone")?,
            address: customer.address,
        };

        let items = self
            .items
            .filter(|items| !items.is_empty())
            .ok_or(ValidationError::MissingField("items"))?;

        let total = self
            .total
            .filter(|total| *total != 0.0 && !total.is_nan())
            .ok_or(ValidationError::MissingField("total"))?;

        Ok(NewOrder {
            customer,
            items,
            total,
            delivery_date: self.delivery_date,
            notes: self.notes,
        })
    }
}

impl NewOrder {
    /// Stamp the order as freshly created and pending.
    #[must_use]
    pub fn into_order(self, id: OrderId, now: Timestamp) -> Order {
        Order {
            id,
            customer: self.customer,
            items: self.items,
            total: self.total,
            delivery_date: self.delivery_date,
            notes: self.notes,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(ValidationError::MissingField(field))
}
