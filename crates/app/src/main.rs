//! Bakery Admin CLI

use std::process;

use clap::Parser;

mod cli;

use cli::Cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    if let Err(error) = Cli::parse().run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
