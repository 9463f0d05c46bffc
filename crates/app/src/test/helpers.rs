//! Test Helpers

use jiff::Timestamp;

use crate::domain::orders::{
    data::{CustomerSubmission, OrderSubmission},
    models::{Customer, Customization, Order, OrderId, OrderItem, OrderStatus},
};

pub(crate) fn sample_item(id: &str, name: &str) -> OrderItem {
    OrderItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity: 2,
        price: 40.0,
        customization: Some(Customization {
            size: Some("8 inch".to_string()),
            flavor: Some("Vanilla".to_string()),
            color: Some("White".to_string()),
            special_details: Some("Happy Birthday Ada".to_string()),
        }),
    }
}

pub(crate) fn sample_submission() -> OrderSubmission {
    OrderSubmission {
        customer: Some(CustomerSubmission {
            name: Some("Ada Baker".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            address: Some("1 Flour Lane".to_string()),
        }),
        items: Some(vec![sample_item("1", "Classic Vanilla Cake")]),
        total: Some(80.0),
        delivery_date: Some("2026-03-05".to_string()),
        notes: Some("Leave at the door".to_string()),
    }
}

/// A pending order created (and last updated) at `created_at`.
pub(crate) fn sample_order(id: &str, created_at: &str) -> Result<Order, jiff::Error> {
    let created_at: Timestamp = created_at.parse()?;

    Ok(Order {
        id: OrderId::from(id),
        customer: Customer {
            name: "Ada Baker".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: Some("1 Flour Lane".to_string()),
        },
        items: vec![sample_item("1", "Classic Vanilla Cake")],
        total: 80.0,
        delivery_date: Some("2026-03-05".to_string()),
        notes: Some("Leave at the door".to_string()),
        status: OrderStatus::Pending,
        created_at,
        updated_at: created_at,
    })
}
