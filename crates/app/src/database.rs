//! Database connection management

use std::{sync::Arc, time::Duration};

use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions, query_scalar};
use tokio::{sync::watch, task::JoinHandle, time};
use tracing::{info, warn};

/// Whether the durable store is currently reachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

/// Shared connectivity flag for the durable store.
///
/// Starts out disconnected. Every clone observes the same state.
#[derive(Debug, Clone)]
pub struct Connectivity {
    state: Arc<watch::Sender<ConnectionState>>,
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}

impl Connectivity {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);

        Self {
            state: Arc::new(state),
        }
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Mark the durable store reachable. Returns `true` on a transition.
    pub fn connected(&self) -> bool {
        self.transition(ConnectionState::Connected)
    }

    /// Mark the durable store unreachable. Returns `true` on a transition.
    pub fn disconnected(&self) -> bool {
        self.transition(ConnectionState::Disconnected)
    }

    fn transition(&self, next: ConnectionState) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if *state == next {
                return false;
            }

            *state = next;

            true
        });

        if changed {
            match next {
                ConnectionState::Connected => info!("durable order store connected"),
                ConnectionState::Disconnected => {
                    warn!("durable order store unreachable, using in-memory storage");
                }
            }
        }

        changed
    }
}

/// Build a pool without opening any connection yet.
///
/// # Errors
///
/// Returns an error if the database URL cannot be parsed.
pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Round-trip a trivial query.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;

    Ok(())
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Probe the database on a fixed interval and keep `connectivity` current.
///
/// The first probe runs immediately. Migrations run on every transition into
/// the connected state; a failed migration leaves the store disconnected.
pub fn spawn_monitor(
    pool: PgPool,
    connectivity: Connectivity,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            probe(&pool, &connectivity).await;
        }
    })
}

async fn probe(pool: &PgPool, connectivity: &Connectivity) {
    if let Err(error) = ping(pool).await {
        if connectivity.disconnected() {
            warn!(error = %error, "database health check failed");
        }

        return;
    }

    if connectivity.is_connected() {
        return;
    }

    match migrate(pool).await {
        Ok(()) => {
            connectivity.connected();
        }
        Err(error) => warn!(error = %error, "failed to apply database migrations"),
    }
}
