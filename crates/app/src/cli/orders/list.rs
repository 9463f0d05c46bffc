use bakery_app::{
    database,
    domain::orders::stores::{OrdersStore, PgOrdersStore},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListOrdersArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let orders = PgOrdersStore::new(pool)
        .list()
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    for order in orders {
        println!("order_id: {}", order.id);
        println!("status: {}", order.status);
        println!("customer: {} <{}>", order.customer.name, order.customer.email);
        println!("total: {:.2}", order.total);
        println!(
            "delivery_date: {}",
            order.delivery_date.as_deref().unwrap_or("none")
        );
        println!("created_at: {}", order.created_at);
        println!("updated_at: {}", order.updated_at);
        println!();
    }

    Ok(())
}
