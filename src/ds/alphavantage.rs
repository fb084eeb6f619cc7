use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    config::FsConfig,
    data::stock::CompanyOverview,
    ds::MarketDataSource,
    error::{FsError, FsResult},
    utils::net::http_get,
};

pub const ALPHAVANTAGE_API_DEFAULT: &str = "https://www.alphavantage.co";

#[derive(Clone, Debug)]
pub struct AlphaVantage {
    api_url: String,
    api_key: String,
    timeout_secs: u64,
    max_retries: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OverviewResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    market_capitalization: Option<f64>,
    #[serde(rename = "EBITDA", default, deserialize_with = "lenient_f64")]
    ebitda: Option<f64>,
    #[serde(rename = "PERatio", default, deserialize_with = "lenient_f64")]
    pe_ratio: Option<f64>,
    #[serde(rename = "EPS", default, deserialize_with = "lenient_f64")]
    eps: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    book_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    dividend_yield: Option<f64>,
    #[serde(rename = "ReturnOnEquityTTM", default, deserialize_with = "lenient_f64")]
    return_on_equity_ttm: Option<f64>,
}

impl AlphaVantage {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            timeout_secs: 30,
            max_retries: 3,
        }
    }

    pub fn from_config(config: &FsConfig) -> Self {
        Self::new(&config.alphavantage_api, &config.alphavantage_api_key)
            .with_http(config.http_timeout_secs, config.http_max_retries)
    }

    pub fn with_http(mut self, timeout_secs: u64, max_retries: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self.max_retries = max_retries;
        self
    }

    pub async fn call_api(&self, function: &str, symbol: &str) -> FsResult<Value> {
        let mut query: HashMap<String, String> = HashMap::new();
        query.insert("function".to_string(), function.to_string());
        query.insert("symbol".to_string(), symbol.to_string());
        query.insert("apikey".to_string(), self.api_key.to_string());

        debug!("[Alpha Vantage] {function} {symbol}");

        let bytes = http_get(
            &self.api_url,
            Some("/query"),
            &query,
            self.timeout_secs,
            self.max_retries,
        )
        .await?;
        let json: Value = serde_json::from_slice(&bytes)?;

        Ok(json)
    }
}

#[async_trait]
impl MarketDataSource for AlphaVantage {
    async fn fetch_overview(&self, symbol: &str) -> FsResult<Option<CompanyOverview>> {
        let json = self.call_api("OVERVIEW", symbol).await?;
        parse_overview(&json)
    }
}

fn parse_overview(json: &Value) -> FsResult<Option<CompanyOverview>> {
    let Some(obj) = json.as_object() else {
        return Err(FsError::Invalid {
            code: "INVALID_RESPONSE",
            message: format!("Unexpected overview response: {json}"),
        });
    };

    if obj.is_empty() {
        return Ok(None);
    }

    if let Some(message) = obj.get("Error Message") {
        return Err(FsError::Invalid {
            code: "INVALID_REQUEST",
            message: message.as_str().unwrap_or_default().to_string(),
        });
    }

    if let Some(message) = obj.get("Information").or_else(|| obj.get("Note")) {
        return Err(FsError::Invalid {
            code: "API_LIMIT_REACHED",
            message: message.as_str().unwrap_or_default().to_string(),
        });
    }

    let response: OverviewResponse = serde_json::from_value(json.clone())?;
    let Some(symbol) = response.symbol else {
        return Ok(None);
    };

    Ok(Some(CompanyOverview {
        symbol: symbol.to_uppercase(),
        name: response.name,
        description: response.description,
        market_cap: response.market_capitalization,
        ebitda: response.ebitda,
        pe_ratio: response.pe_ratio,
        eps: response.eps,
        book_value: response.book_value,
        dividend_yield: response.dividend_yield.map(to_percent),
        return_on_equity: response.return_on_equity_ttm.map(to_percent),
    }))
}

// Yields and returns are reported as fractions
fn to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}

// Missing figures are reported as "None", "-" or an empty string.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "None" && s != "-"))
}
