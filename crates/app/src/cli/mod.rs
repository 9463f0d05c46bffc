use clap::{Parser, Subcommand};

mod db;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "bakery-app", about = "Bakery orders admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Orders(orders::OrdersCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Orders(command) => orders::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
