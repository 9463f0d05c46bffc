//! Mail Config

use std::time::Duration;

use clap::Args;

use bakery_app::notifications::{OperatorContact, SmtpSettings};

/// SMTP relay and shop contact settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP relay port (STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 587_u16)]
    pub smtp_port: u16,

    /// SMTP username, also used as the sender address
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    /// SMTP send timeout, in milliseconds
    #[arg(long, env = "SMTP_TIMEOUT_MS", default_value_t = 10_000_u64)]
    pub smtp_timeout_ms: u64,

    /// Address that receives new-order alerts
    #[arg(long, env = "BAKER_EMAIL", default_value = "baker@pastryparadise.com")]
    pub baker_email: String,

    /// Sender name on new-order alerts
    #[arg(long, env = "BAKER_NAME", default_value = "Baker")]
    pub baker_name: String,

    /// Contact phone quoted to customers
    #[arg(long, env = "BAKER_PHONE", default_value = "(555) 123-4567")]
    pub baker_phone: String,

    /// Shop name used in customer emails
    #[arg(long, env = "SHOP_NAME", default_value = "Pastry Paradise")]
    pub shop_name: String,
}

impl MailConfig {
    /// Relay settings, present only when both credentials are set.
    #[must_use]
    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        let username = self.smtp_user.as_ref().filter(|user| !user.is_empty())?;
        let password = self.smtp_pass.as_ref().filter(|pass| !pass.is_empty())?;

        Some(SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username: username.clone(),
            password: password.clone(),
            timeout: Duration::from_millis(self.smtp_timeout_ms),
        })
    }

    #[must_use]
    pub fn operator(&self) -> OperatorContact {
        OperatorContact {
            email: self.baker_email.clone(),
            name: self.baker_name.clone(),
            phone: self.baker_phone.clone(),
        }
    }
}
