use clap::Subcommand;

mod calc;
mod check;
mod config;
mod index;
mod stock;

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand, about = "Calculate financial metrics")]
    Calc(calc::CalcCommand),

    #[command(about = "Check whether a stock symbol or an index is valid")]
    #[clap(visible_aliases = &["validate"])]
    Check(Box<check::CheckCommand>),

    #[command(subcommand, about = "Show or set configurations")]
    Config(config::ConfigCommand),

    #[command(subcommand, about = "List or describe market indices")]
    Index(index::IndexCommand),

    #[command(about = "Show stock details")]
    #[clap(visible_aliases = &["detail"])]
    Stock(Box<stock::StockCommand>),
}
