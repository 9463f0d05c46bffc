//! Server configuration module

use clap::Parser;

use bakery_app::context::AppSettings;

use crate::config::{
    db::DatabaseConfig, mail::MailConfig, observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod server;

/// Bakery JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "bakery-json", about = "Bakery Orders JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Order database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Order notification email settings.
    #[command(flatten)]
    pub mail: MailConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database: self.database.settings(),
            smtp: self.mail.smtp_settings(),
            operator: self.mail.operator(),
            shop_name: self.mail.shop_name.clone(),
        }
    }
}
