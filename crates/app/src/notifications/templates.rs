//! HTML email bodies.
//!
//! Rendering goes through `askama`, which escapes every interpolated value,
//! so customer-provided text can never inject markup into an email.

use askama::Template;

use crate::domain::orders::models::{Order, OrderItem};

const NOT_APPLICABLE: &str = "N/A";
const DATE_TO_BE_CONFIRMED: &str = "To be confirmed";

/// One row of the item table.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLine<'a> {
    pub name: &'a str,
    pub size: &'a str,
    pub flavor: &'a str,
    pub color: &'a str,
    pub quantity: u32,
    pub line_total: String,
    pub special_details: Option<&'a str>,
}

impl<'a> ItemLine<'a> {
    fn new(item: &'a OrderItem) -> Self {
        let customization = item.customization.as_ref();
        let field = |value: Option<&'a String>| {
            value
                .map(String::as_str)
                .filter(|value| !value.trim().is_empty())
        };

        Self {
            name: &item.name,
            size: field(customization.and_then(|c| c.size.as_ref())).unwrap_or(NOT_APPLICABLE),
            flavor: field(customization.and_then(|c| c.flavor.as_ref())).unwrap_or(NOT_APPLICABLE),
            color: field(customization.and_then(|c| c.color.as_ref())).unwrap_or(NOT_APPLICABLE),
            quantity: item.quantity,
            line_total: money(item.line_total()),
            special_details: field(customization.and_then(|c| c.special_details.as_ref())),
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "operator_order.html")]
pub struct OperatorOrderEmail<'a> {
    order_id: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: &'a str,
    address: Option<&'a str>,
    delivery_date: &'a str,
    total: String,
    items: Vec<ItemLine<'a>>,
    notes: Option<&'a str>,
}

impl<'a> OperatorOrderEmail<'a> {
    #[must_use]
    pub fn new(order: &'a Order) -> Self {
        Self {
            order_id: order.id.as_str(),
            customer_name: &order.customer.name,
            customer_email: &order.customer.email,
            customer_phone: &order.customer.phone,
            address: order.customer.address.as_deref(),
            delivery_date: delivery_date(order),
            total: money(order.total),
            items: order.items.iter().map(ItemLine::new).collect(),
            notes: order.notes.as_deref().filter(|notes| !notes.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn subject(&self) -> String {
        format!("New Order: {}", self.order_id)
    }
}

#[derive(Debug, Template)]
#[template(path = "customer_order.html")]
pub struct CustomerOrderEmail<'a> {
    order_id: &'a str,
    customer_name: &'a str,
    delivery_date: &'a str,
    total: String,
    items: Vec<ItemLine<'a>>,
    contact_phone: &'a str,
    shop_name: &'a str,
}

impl<'a> CustomerOrderEmail<'a> {
    #[must_use]
    pub fn new(order: &'a Order, contact_phone: &'a str, shop_name: &'a str) -> Self {
        Self {
            order_id: order.id.as_str(),
            customer_name: &order.customer.name,
            delivery_date: delivery_date(order),
            total: money(order.total),
            items: order.items.iter().map(ItemLine::new).collect(),
            contact_phone,
            shop_name,
        }
    }

    #[must_use]
    pub fn subject(&self) -> String {
        format!("Order Confirmation - {}", self.shop_name)
    }
}

fn delivery_date(order: &Order) -> &str {
    order
        .delivery_date
        .as_deref()
        .filter(|date| !date.trim().is_empty())
        .unwrap_or(DATE_TO_BE_CONFIRMED)
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}
