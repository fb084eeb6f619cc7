use colored::Colorize;
use finsolve::api;
use tabled::settings::{
    Color, Width,
    measurement::Percent,
    object::Columns,
    peaker::Priority,
};

#[derive(clap::Args)]
pub struct IndexShowCommand {
    #[arg(help = "Index name, e.g. \"NIFTY 50\"")]
    name: String,
}

impl IndexShowCommand {
    pub async fn exec(&self) {
        let insights = match api::insights() {
            Ok(insights) => insights,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        };

        match insights.index_detail(&self.name) {
            Ok(index) => {
                let table_data: Vec<Vec<String>> = vec![
                    vec!["Index".to_string(), index.name.to_string()],
                    vec!["Region".to_string(), index.market.to_string()],
                    vec!["Description".to_string(), index.description.to_string()],
                ];

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                table.with(Width::wrap(Percent(100)).priority(Priority::max(true)));
                println!("{table}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
