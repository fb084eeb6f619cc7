use clap::Subcommand;
use colored::Colorize;
use finsolve::utils::financial;
use tabled::settings::{Color, object::Columns};

#[derive(Subcommand)]
pub enum CalcCommand {
    #[command(about = "Years to double money by the Rule of 72")]
    Double {
        #[arg(help = "Annual interest rate in percent, e.g. 8")]
        interest: f64,
    },

    #[command(about = "Years to triple money by the Rule of 114")]
    Triple {
        #[arg(help = "Annual interest rate in percent, e.g. 8")]
        interest: f64,
    },

    #[command(about = "Earnings per share")]
    Eps {
        #[arg(allow_negative_numbers = true)]
        earnings: f64,
        shares: u64,
    },

    #[command(about = "Price to earnings ratio")]
    Pe {
        #[arg(allow_negative_numbers = true)]
        earnings: f64,
        shares: u64,
        price: f64,
    },

    #[command(about = "Return on equity in percent")]
    Roe { net_income: f64, equity: f64 },

    #[command(about = "Return on capital employed in percent")]
    Roce { ebit: f64, capital_employed: f64 },

    #[command(about = "Debt to equity in percent")]
    #[clap(visible_aliases = &["de"])]
    DebtToEquity { total_debt: f64, equity: f64 },

    #[command(about = "Dividend yield as a percentage of the share price")]
    #[clap(visible_aliases = &["dyp"])]
    DividendYieldPct { annual_dividend: f64, price: f64 },

    #[command(about = "Dividend amount per share from a yield percentage")]
    #[clap(visible_aliases = &["dy"])]
    DividendYield { yield_percentage: f64, price: f64 },

    #[command(about = "Price to book ratio")]
    Pb { price: f64, book_value_per_share: f64 },
}

impl CalcCommand {
    pub async fn exec(&self) {
        let (title, result) = match self {
            CalcCommand::Double { interest } => (
                "Years to double",
                financial::years_to_double_money(*interest),
            ),
            CalcCommand::Triple { interest } => (
                "Years to triple",
                financial::years_to_triple_money(*interest),
            ),
            CalcCommand::Eps { earnings, shares } => (
                "EPS",
                financial::earnings_per_share(*earnings, *shares),
            ),
            CalcCommand::Pe {
                earnings,
                shares,
                price,
            } => ("P/E", financial::pe_ratio(*earnings, *shares, *price)),
            CalcCommand::Roe { net_income, equity } => {
                ("ROE %", financial::roe_ratio(*net_income, *equity))
            }
            CalcCommand::Roce {
                ebit,
                capital_employed,
            } => ("ROCE %", financial::roce_ratio(*ebit, *capital_employed)),
            CalcCommand::DebtToEquity { total_debt, equity } => (
                "Debt to equity %",
                financial::debt_to_equity(*total_debt, *equity),
            ),
            CalcCommand::DividendYieldPct {
                annual_dividend,
                price,
            } => (
                "Dividend yield %",
                financial::dividend_yield_percentage(*annual_dividend, *price),
            ),
            CalcCommand::DividendYield {
                yield_percentage,
                price,
            } => (
                "Dividend per share",
                financial::dividend_yield(*yield_percentage, *price),
            ),
            CalcCommand::Pb {
                price,
                book_value_per_share,
            } => (
                "P/B",
                financial::price_to_book_ratio(*price, *book_value_per_share),
            ),
        };

        match result {
            Ok(value) => {
                let table_data: Vec<Vec<String>> =
                    vec![vec![title.to_string(), format!("{value:.4}")]];

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                println!("{table}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
