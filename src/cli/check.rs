use colored::Colorize;
use finsolve::api;
use tabled::settings::{
    Color,
    object::{Columns, Object, Rows},
};

#[derive(clap::Args)]
pub struct CheckCommand {
    #[arg(help = "Stock symbol or index name to check")]
    name: String,

    #[arg(short = 'i', long = "index", help = "Check an index instead of a stock symbol")]
    index: bool,
}

impl CheckCommand {
    pub async fn exec(&self) {
        let insights = match api::insights() {
            Ok(insights) => insights,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        };

        let valid = if self.index {
            insights.is_valid_index(&self.name)
        } else {
            match insights.is_valid_symbol(&self.name).await {
                Ok(valid) => valid,
                Err(err) => {
                    println!("[!] {}", err.to_string().red());
                    return;
                }
            }
        };

        let table_data: Vec<Vec<String>> = vec![vec![
            self.name.trim().to_string(),
            if valid { "✔" } else { "✘" }.to_string(),
        ]];

        let mut table = tabled::builder::Builder::from_iter(&table_data).build();
        table.modify(Columns::first(), Color::FG_CYAN);
        table.modify(
            Rows::first().not(Columns::first()),
            if valid {
                Color::FG_GREEN
            } else {
                Color::FG_RED
            },
        );
        println!("{table}");
    }
}
