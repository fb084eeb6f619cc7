use colored::Colorize;
use finsolve::{
    api,
    api::StockDetail,
    error::FsError,
    utils::text::format_optional,
};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::settings::{
    Color, Width,
    measurement::Percent,
    object::Columns,
    peaker::Priority,
};
use tokio::time::Duration;

#[derive(clap::Args)]
pub struct StockCommand {
    #[arg(help = "Stock symbol, e.g. AAPL or RELIANCE")]
    symbol: String,

    #[arg(long = "json", help = "Print the stock detail as JSON")]
    json: bool,
}

impl StockCommand {
    pub async fn exec(&self) {
        let insights = match api::insights() {
            Ok(insights) => insights,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return;
            }
        };

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{msg}[{elapsed}] {spinner:.cyan}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));

        match insights.stock_detail(&self.symbol).await {
            Ok(detail) => {
                spinner.finish_and_clear();
                self.print(&detail);
            }
            Err(FsError::DataUnavailable {
                message,
                partial: Some(partial),
                ..
            }) => {
                spinner.finish_and_clear();
                println!("[!] {}", message.yellow());
                self.print(&partial);
            }
            Err(err) => {
                spinner.finish_with_message(format!("{} ", err.to_string().red()));
            }
        }
    }

    fn print(&self, detail: &StockDetail) {
        if self.json {
            match serde_json::to_string_pretty(detail) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("[!] {}", err.to_string().red()),
            }
            return;
        }

        let table_data: Vec<Vec<String>> = vec![
            vec!["Symbol".to_string(), detail.symbol.to_string()],
            vec!["Company".to_string(), detail.company.to_string()],
            vec![
                "Market Cap".to_string(),
                format_optional(detail.market_cap.as_ref()),
            ],
            vec![
                "Price".to_string(),
                format_optional(detail.curr_market_price.map(|v| format!("{v:.2}"))),
            ],
            vec!["P/E".to_string(), format_optional(detail.pe_ratio)],
            vec!["Book Value".to_string(), format_optional(detail.book_value)],
            vec!["Dividend".to_string(), format_optional(detail.dividend)],
            vec![
                "ROCE".to_string(),
                format_optional(detail.roce.map(|v| format!("{v:.2}%"))),
            ],
            vec!["ROE".to_string(), format_optional(detail.roe)],
            vec!["Face Value".to_string(), format_optional(detail.face_value)],
            vec!["About".to_string(), format_optional(detail.about.as_ref())],
        ];

        let mut table = tabled::builder::Builder::from_iter(&table_data).build();
        table.modify(Columns::first(), Color::FG_CYAN);
        table.with(Width::wrap(Percent(100)).priority(Priority::max(true)));
        println!("{table}");
    }
}
