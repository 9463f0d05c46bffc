//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use serde_json::{Value, json};

use bakery_app::{
    context::AppContext,
    domain::orders::{
        MockOrdersService,
        models::{Customer, Customization, Order, OrderId, OrderItem, OrderStatus},
    },
};

use crate::state::State;

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = State::from_app_context(AppContext::from_orders_service(Arc::new(orders)));

    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn make_order(id: &str) -> Order {
    let created_at = Timestamp::from_millisecond(1_767_225_600_123).unwrap_or(Timestamp::UNIX_EPOCH);

    Order {
        id: OrderId::from(id),
        customer: Customer {
            name: "Ada Baker".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: Some("1 Flour Lane".to_string()),
        },
        items: vec![OrderItem {
            id: "cake-1".to_string(),
            name: "Chocolate Cake".to_string(),
            quantity: 2,
            price: 40.0,
            customization: Some(Customization {
                size: Some("8 inch".to_string()),
                flavor: Some("Chocolate".to_string()),
                color: None,
                special_details: Some("Happy Birthday Ada".to_string()),
            }),
        }],
        total: 80.0,
        delivery_date: Some("2026-03-05".to_string()),
        notes: None,
        status: OrderStatus::Pending,
        created_at,
        updated_at: created_at,
    }
}

/// A complete storefront submission.
pub(crate) fn order_payload() -> Value {
    json!({
        "customer": {
            "name": "Ada Baker",
            "email": "ada@example.com",
            "phone": "555-0100",
            "address": "1 Flour Lane"
        },
        "items": [{
            "id": 7,
            "name": "Chocolate Cake",
            "quantity": 2,
            "price": 40.0,
            "customization": {
                "size": "8 inch",
                "flavor": "Chocolate",
                "specialDetails": "Happy Birthday Ada"
            }
        }],
        "total": 80.0,
        "deliveryDate": "2026-03-05",
        "notes": "Leave at the door"
    })
}
