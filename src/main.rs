//! # finsolve CLI

use clap::Parser;

use crate::cli::Commands;

mod cli;

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    finsolve::init();

    match &cli.command {
        Commands::Calc(cmd) => {
            cmd.exec().await;
        }
        Commands::Check(cmd) => {
            cmd.exec().await;
        }
        Commands::Config(cmd) => {
            cmd.exec().await;
        }
        Commands::Index(cmd) => {
            cmd.exec().await;
        }
        Commands::Stock(cmd) => {
            cmd.exec().await;
        }
    }
}
