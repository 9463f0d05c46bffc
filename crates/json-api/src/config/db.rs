//! Database Config

use std::time::Duration;

use clap::Args;

use bakery_app::context::DatabaseSettings;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string; orders stay in memory when unset
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Upper bound for a single database operation, in milliseconds
    #[arg(long, env = "DATABASE_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub database_timeout_ms: u64,

    /// Interval between database health checks, in milliseconds
    #[arg(long, env = "DATABASE_HEALTH_INTERVAL_MS", default_value_t = 5_000_u64)]
    pub database_health_interval_ms: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn settings(&self) -> Option<DatabaseSettings> {
        let url = self
            .database_url
            .as_ref()
            .filter(|url| !url.trim().is_empty())?;

        Some(DatabaseSettings {
            url: url.clone(),
            timeout: Duration::from_millis(self.database_timeout_ms),
            health_interval: Duration::from_millis(self.database_health_interval_ms),
        })
    }
}
