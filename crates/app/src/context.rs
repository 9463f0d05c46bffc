//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

use crate::{
    database::{self, ConnectionState, Connectivity},
    domain::orders::{
        BakeryOrdersService, OrdersService,
        stores::{FallbackOrdersStore, MemoryOrdersStore, OrdersStore, PgOrdersStore},
    },
    notifications::{
        Mailer, MailerError, NotificationDispatcher, OperatorContact, SmtpMailer, SmtpSettings,
    },
};

/// Durable store settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub timeout: Duration,
    pub health_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// `None` keeps every order in memory.
    pub database: Option<DatabaseSettings>,

    /// `None` turns notifications into logged no-ops.
    pub smtp: Option<SmtpSettings>,

    pub operator: OperatorContact,
    pub shop_name: String,
}

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("invalid database configuration")]
    Database(#[source] sqlx::Error),

    #[error("invalid mail configuration")]
    Mailer(#[source] MailerError),
}

/// Where orders are currently being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Database,
    Memory,
}

impl StorageMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StorageMode::Database => "database",
            StorageMode::Memory => "memory",
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
    connectivity: Connectivity,
    monitor: Option<Arc<JoinHandle<()>>>,
}

impl AppContext {
    /// Wire stores, notifications and the orders service from settings.
    ///
    /// No database connection is attempted here. When a database is
    /// configured a background monitor is spawned that connects, migrates and
    /// keeps the connectivity state current; until then orders go to memory.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error when the database URL or SMTP settings are invalid.
    pub fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let mailer = settings
            .smtp
            .map(SmtpMailer::new)
            .transpose()
            .map_err(AppInitError::Mailer)?
            .map(|mailer| Arc::new(mailer) as Arc<dyn Mailer>);

        if mailer.is_none() {
            info!("SMTP credentials not configured, order emails are disabled");
        }

        let notifier = Arc::new(NotificationDispatcher::new(
            mailer,
            settings.operator,
            settings.shop_name,
        ));

        let memory = Arc::new(MemoryOrdersStore::new());

        let (store, connectivity, monitor) = match settings.database {
            Some(database) => {
                let pool = database::connect_lazy(&database.url, database.timeout)
                    .map_err(AppInitError::Database)?;

                let connectivity = Connectivity::new();
                let monitor = database::spawn_monitor(
                    pool.clone(),
                    connectivity.clone(),
                    database.health_interval,
                );

                let store = FallbackOrdersStore::new(
                    Arc::new(PgOrdersStore::new(pool)),
                    memory,
                    connectivity.clone(),
                    database.timeout,
                );

                (store, connectivity, Some(Arc::new(monitor)))
            }
            None => {
                info!("DATABASE_URL not set, orders are kept in memory only");

                let store = FallbackOrdersStore::memory_only(memory);
                let connectivity = store.connectivity().clone();

                (store, connectivity, None)
            }
        };

        let store: Arc<dyn OrdersStore> = Arc::new(store);

        Ok(Self {
            orders: Arc::new(BakeryOrdersService::new(store, notifier)),
            connectivity,
            monitor,
        })
    }

    /// Context around an existing orders service, with no database.
    #[must_use]
    pub fn from_orders_service(orders: Arc<dyn OrdersService>) -> Self {
        Self {
            orders,
            connectivity: Connectivity::new(),
            monitor: None,
        }
    }

    #[must_use]
    pub fn storage_mode(&self) -> StorageMode {
        match self.connectivity.state() {
            ConnectionState::Connected => StorageMode::Database,
            ConnectionState::Disconnected => StorageMode::Memory,
        }
    }

    /// Stop the database health monitor, if one is running.
    pub fn shutdown(&self) {
        if let Some(monitor) = &self.monitor {
            monitor.abort();
        }
    }
}
