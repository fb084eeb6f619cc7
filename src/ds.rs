use async_trait::async_trait;

use crate::{data::stock::CompanyOverview, error::FsResult};

pub mod alphavantage;

/// External market data provider consulted for live stock figures.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// `Ok(None)` when the provider does not know the symbol.
    async fn fetch_overview(&self, symbol: &str) -> FsResult<Option<CompanyOverview>>;
}
