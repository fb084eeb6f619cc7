use serde::{Deserialize, Serialize};

use crate::{
    error::{FsError, FsResult},
    utils::text::normalize_key,
};

pub const STOCK_REQUIRED_COLUMNS: &[&[&str]] = &[&["symbol"], &["name"]];

/// Market figures captured when the dataset was assembled.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StockSnapshot {
    pub market_cap_crores: Option<f64>,
    pub curr_market_price: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub book_value: Option<f64>,
    pub dividend: Option<f64>,
    pub roce: Option<f64>,
    pub roe: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StockRecord {
    pub symbol: String,
    pub company: String,
    pub about: Option<String>,
    pub face_value: Option<f64>,
    pub snapshot: StockSnapshot,
}

#[derive(Deserialize)]
pub struct StockRow {
    symbol: String,
    name: String,
    #[serde(default)]
    about: Option<String>,
    #[serde(default)]
    market_cap: Option<f64>,
    #[serde(default)]
    curr_market_price: Option<f64>,
    #[serde(default)]
    pe_ratio: Option<f64>,
    #[serde(default)]
    book_value: Option<f64>,
    #[serde(default, alias = "divident")]
    dividend: Option<f64>,
    #[serde(default)]
    roce: Option<f64>,
    #[serde(default)]
    roe: Option<f64>,
    #[serde(default)]
    face_value: Option<f64>,
}

impl TryFrom<StockRow> for StockRecord {
    type Error = FsError;

    fn try_from(row: StockRow) -> FsResult<Self> {
        let symbol = normalize_key(&row.symbol);
        if symbol.is_empty() {
            return Err(FsError::Invalid {
                code: "EMPTY_SYMBOL",
                message: "Stock row has an empty symbol".to_string(),
            });
        }

        let company = row.name.trim().to_string();
        if company.is_empty() {
            return Err(FsError::Invalid {
                code: "EMPTY_COMPANY",
                message: format!("Stock '{symbol}' has an empty company name"),
            });
        }

        Ok(Self {
            symbol,
            company,
            about: row.about.filter(|s| !s.trim().is_empty()),
            face_value: row.face_value,
            snapshot: StockSnapshot {
                market_cap_crores: row.market_cap,
                curr_market_price: row.curr_market_price,
                pe_ratio: row.pe_ratio,
                book_value: row.book_value,
                dividend: row.dividend,
                roce: row.roce,
                roe: row.roe,
            },
        })
    }
}
