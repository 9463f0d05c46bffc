use bakery_app::{
    clock, database,
    domain::orders::{
        models::{OrderId, OrderStatus},
        stores::{OrdersStore, PgOrdersStore},
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct UpdateStatusArgs {
    /// Order identifier, e.g. ORD-1767225600123
    order_id: String,

    /// One of pending, confirmed, preparing, ready, delivered, cancelled
    status: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: UpdateStatusArgs) -> Result<(), String> {
    let status = args.status.parse::<OrderStatus>().map_err(|error| format!("{error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let order = PgOrdersStore::new(pool)
        .update_status(&OrderId::from(args.order_id), status, clock::now())
        .await
        .map_err(|error| format!("failed to update order: {error}"))?;

    println!("order_id: {}", order.id);
    println!("status: {}", order.status);
    println!("updated_at: {}", order.updated_at);

    Ok(())
}
