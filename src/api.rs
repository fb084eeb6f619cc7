use std::sync::Arc;

use log::debug;

pub use crate::{
    config::FsConfig,
    data::stock::{MarketCap, StockDetail},
    insights::StockInsights,
    reference::index::{IndexRecord, Market},
};
use crate::{ds::alphavantage::AlphaVantage, error::FsResult, reference::ReferenceData};

/// Builds the lookup service from the stored configuration.
pub fn insights() -> FsResult<StockInsights> {
    let config = FsConfig::load()?;
    open(&config)
}

pub fn open(config: &FsConfig) -> FsResult<StockInsights> {
    let data_dir = config.data_dir();
    debug!("Open reference data {data_dir:?}");

    let reference = ReferenceData::load(data_dir.as_deref())?;
    let source = AlphaVantage::from_config(config);

    Ok(StockInsights::new(Arc::new(reference), Box::new(source))
        .with_external_validation(config.external_validation))
}

pub fn get_config() -> FsResult<FsConfig> {
    FsConfig::load()
}

pub fn set_config(key: &str, value: &str) -> FsResult<()> {
    let mut config = FsConfig::load_stored()?;
    config.set(key, value)?;
    config.store()
}
