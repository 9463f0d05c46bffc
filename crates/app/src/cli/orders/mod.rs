use clap::{Args, Subcommand};

mod list;
mod status;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List stored orders, newest first
    List(list::ListOrdersArgs),

    /// Change the status of an order
    Status(status::UpdateStatusArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list::run(args).await,
        OrdersSubcommand::Status(args) => status::run(args).await,
    }
}
