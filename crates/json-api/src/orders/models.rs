//! Order request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Deserializer, Serialize};

use bakery_app::domain::orders::{
    data::{CustomerSubmission, OrderSubmission},
    models::{Customer, Customization, Order, OrderItem},
};

/// Order as submitted by the storefront.
///
/// Every top-level field is optional here so that a missing one is reported
/// by name rather than as a generic parse failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRequest {
    #[serde(default)]
    pub customer: Option<CustomerBody>,

    #[serde(default)]
    pub items: Option<Vec<OrderItemBody>>,

    /// Order total, taken as given
    #[serde(default)]
    pub total: Option<f64>,

    /// Requested delivery date, free-form
    #[serde(default)]
    pub delivery_date: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl From<OrderRequest> for OrderSubmission {
    fn from(request: OrderRequest) -> Self {
        OrderSubmission {
            customer: request.customer.map(|customer| CustomerSubmission {
                name: customer.name,
                email: customer.email,
                phone: customer.phone,
                address: customer.address,
            }),
            items: request
                .items
                .map(|items| items.into_iter().map(OrderItem::from).collect()),
            total: request.total,
            delivery_date: request.delivery_date,
            notes: request.notes,
        }
    }
}

/// Customer contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerBody {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<Customer> for CustomerBody {
    fn from(customer: Customer) -> Self {
        CustomerBody {
            name: Some(customer.name),
            email: Some(customer.email),
            phone: Some(customer.phone),
            address: customer.address,
        }
    }
}

/// Order line.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemBody {
    /// Catalog item id; numbers are accepted and kept as text
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub name: String,

    pub quantity: u32,

    /// Unit price
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<CustomizationBody>,
}

impl From<OrderItemBody> for OrderItem {
    fn from(item: OrderItemBody) -> Self {
        OrderItem {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            price: item.price,
            customization: item.customization.map(Customization::from),
        }
    }
}

impl From<OrderItem> for OrderItemBody {
    fn from(item: OrderItem) -> Self {
        OrderItemBody {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            price: item.price,
            customization: item.customization.map(CustomizationBody::from),
        }
    }
}

/// Cake customisation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomizationBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_details: Option<String>,
}

impl From<CustomizationBody> for Customization {
    fn from(body: CustomizationBody) -> Self {
        Customization {
            size: body.size,
            flavor: body.flavor,
            color: body.color,
            special_details: body.special_details,
        }
    }
}

impl From<Customization> for CustomizationBody {
    fn from(customization: Customization) -> Self {
        CustomizationBody {
            size: customization.size,
            flavor: customization.flavor,
            color: customization.color,
            special_details: customization.special_details,
        }
    }
}

/// Stored order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// Order id, `ORD-<millis>`
    pub id: String,

    pub customer: CustomerBody,

    pub items: Vec<OrderItemBody>,

    pub total: f64,

    pub delivery_date: Option<String>,

    pub notes: Option<String>,

    /// One of pending, confirmed, preparing, ready, delivered, cancelled
    pub status: String,

    /// RFC 3339 creation time
    pub created_at: String,

    /// RFC 3339 time of the last status change
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.into_string(),
            customer: order.customer.into(),
            items: order.items.into_iter().map(OrderItemBody::from).collect(),
            total: order.total,
            delivery_date: order.delivery_date,
            notes: order.notes,
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
