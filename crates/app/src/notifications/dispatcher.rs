//! Best-effort order notifications.

use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    domain::orders::models::Order,
    notifications::{
        mailer::{Email, Mailer, MailerError},
        templates::{CustomerOrderEmail, OperatorOrderEmail},
    },
};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("failed to render email")]
    Render(#[source] askama::Error),

    #[error(transparent)]
    Mailer(#[from] MailerError),
}

/// The shop operator who receives new-order alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorContact {
    pub email: String,
    pub name: String,
    pub phone: String,
}

/// Order notifications. Failures are never reported to the caller.
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_operator(&self, order: &Order);

    async fn notify_customer(&self, order: &Order);
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Option<Arc<dyn Mailer>>,
    operator: OperatorContact,
    shop_name: String,
}

impl NotificationDispatcher {
    #[must_use]
    pub fn new(
        mailer: Option<Arc<dyn Mailer>>,
        operator: OperatorContact,
        shop_name: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            operator,
            shop_name: shop_name.into(),
        }
    }

    fn operator_email(&self, order: &Order) -> Result<Email, NotificationError> {
        let template = OperatorOrderEmail::new(order);

        Ok(Email {
            from_name: self.operator.name.clone(),
            to: self.operator.email.clone(),
            subject: template.subject(),
            html: template.render().map_err(NotificationError::Render)?,
        })
    }

    fn customer_email(&self, order: &Order) -> Result<Email, NotificationError> {
        let template = CustomerOrderEmail::new(order, &self.operator.phone, &self.shop_name);

        Ok(Email {
            from_name: self.shop_name.clone(),
            to: order.customer.email.clone(),
            subject: template.subject(),
            html: template.render().map_err(NotificationError::Render)?,
        })
    }

    async fn deliver(
        &self,
        recipient: &'static str,
        order: &Order,
        email: Result<Email, NotificationError>,
    ) {
        let Some(mailer) = &self.mailer else {
            info!(order_id = %order.id, recipient, "email not configured, skipping notification");
            return;
        };

        let result = match email {
            Ok(email) => mailer.send(email).await.map_err(NotificationError::from),
            Err(error) => Err(error),
        };

        match result {
            Ok(()) => info!(order_id = %order.id, recipient, "order notification sent"),
            Err(error) => error!(
                order_id = %order.id,
                recipient,
                error = %error,
                "failed to send order notification"
            ),
        }
    }
}

#[async_trait]
impl Notifier for NotificationDispatcher {
    #[tracing::instrument(
        name = "notifications.notify_operator",
        skip(self, order),
        fields(order_id = %order.id)
    )]
    async fn notify_operator(&self, order: &Order) {
        self.deliver("operator", order, self.operator_email(order))
            .await;
    }

    #[tracing::instrument(
        name = "notifications.notify_customer",
        skip(self, order),
        fields(order_id = %order.id)
    )]
    async fn notify_customer(&self, order: &Order) {
        self.deliver("customer", order, self.customer_email(order))
            .await;
    }
}
