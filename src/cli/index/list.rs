use colored::Colorize;
use finsolve::{api, api::Market};
use strum::IntoEnumIterator;
use tabled::settings::{
    Color,
    object::{Columns, Object, Rows},
};

#[derive(clap::Args)]
pub struct IndexListCommand {
    #[arg(short = 'm', long = "market", help = "Market of indices, e.g. -m India or -m US")]
    market: Option<Market>,
}

impl IndexListCommand {
    pub async fn exec(&self) {
        match api::insights() {
            Ok(insights) => {
                let mut table_data: Vec<Vec<String>> =
                    vec![vec!["Index".to_string(), "Region".to_string()]];
                for market in Market::iter().filter(|m| self.market.is_none_or(|x| x == *m)) {
                    for name in insights.list_indices(market) {
                        table_data.push(vec![name, market.to_string()]);
                    }
                }

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
                table.modify(Columns::first().not(Rows::first()), Color::FG_CYAN);
                println!("{table}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
