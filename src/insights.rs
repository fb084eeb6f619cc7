use std::sync::Arc;

use log::{debug, warn};

use crate::{
    data::stock::StockDetail,
    ds::MarketDataSource,
    error::{FsError, FsResult},
    reference::{
        ReferenceData,
        index::{IndexRecord, Market},
    },
    utils::text::normalize_key,
};

/// Stock and index lookups over the reference data, enriched with live figures.
///
/// The local dataset is always consulted first. The market data source is only
/// asked to resolve symbols missing locally, and only while external validation
/// is enabled.
pub struct StockInsights {
    reference: Arc<ReferenceData>,
    source: Box<dyn MarketDataSource>,
    external_validation: bool,
}

impl StockInsights {
    pub fn new(reference: Arc<ReferenceData>, source: Box<dyn MarketDataSource>) -> Self {
        Self {
            reference,
            source,
            external_validation: true,
        }
    }

    pub fn with_external_validation(mut self, enabled: bool) -> Self {
        self.external_validation = enabled;
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub async fn is_valid_symbol(&self, symbol: &str) -> FsResult<bool> {
        let symbol = normalize_key(symbol);
        if symbol.is_empty() {
            return Ok(false);
        }

        if self.reference.contains_symbol(&symbol) {
            return Ok(true);
        }

        if !self.external_validation {
            return Ok(false);
        }

        debug!("Symbol '{symbol}' not found locally, asking market data source");
        Ok(self.source.fetch_overview(&symbol).await?.is_some())
    }

    pub fn is_valid_index(&self, name: &str) -> bool {
        self.reference.contains_index(name)
    }

    pub async fn stock_detail(&self, symbol: &str) -> FsResult<StockDetail> {
        let symbol = normalize_key(symbol);
        if symbol.is_empty() {
            return Err(FsError::SymbolNotFound(symbol));
        }

        let detail = if let Some(record) = self.reference.stock(&symbol) {
            let mut detail = StockDetail::from_record(record);

            match self.source.fetch_overview(&symbol).await {
                Ok(Some(overview)) => detail.merge_overview(&overview),
                Ok(None) => debug!("No live overview for '{symbol}', keep dataset figures"),
                Err(err) => {
                    warn!("Fetch live overview of '{symbol}' error: {err}");
                    return Err(FsError::DataUnavailable {
                        symbol,
                        message: err.to_string(),
                        partial: Some(Box::new(detail)),
                    });
                }
            }

            detail
        } else if self.external_validation {
            match self.source.fetch_overview(&symbol).await {
                Ok(Some(overview)) => {
                    let mut detail = StockDetail::from_overview(&overview);
                    detail.symbol = symbol.to_string();
                    detail
                }
                Ok(None) => return Err(FsError::SymbolNotFound(symbol)),
                Err(err) => {
                    return Err(FsError::DataUnavailable {
                        symbol,
                        message: err.to_string(),
                        partial: None,
                    });
                }
            }
        } else {
            return Err(FsError::SymbolNotFound(symbol));
        };

        let missing = detail.missing_fields();
        if !missing.is_empty() {
            return Err(FsError::DataUnavailable {
                symbol,
                message: format!("Missing {}", missing.join(", ")),
                partial: Some(Box::new(detail)),
            });
        }

        Ok(detail)
    }

    pub fn index_detail(&self, name: &str) -> FsResult<&IndexRecord> {
        self.reference
            .index(name)
            .ok_or_else(|| FsError::IndexNotFound(name.trim().to_string()))
    }

    pub fn index_description(&self, name: &str) -> FsResult<String> {
        Ok(self.index_detail(name)?.description.to_string())
    }

    /// Index names of one market, in dataset file order.
    pub fn list_indices(&self, market: Market) -> Vec<String> {
        self.reference
            .indices_in(market)
            .map(|index| index.name.to_string())
            .collect()
    }

    pub fn index_names(&self) -> Vec<String> {
        self.reference
            .indices()
            .iter()
            .map(|index| index.name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::data::stock::{CompanyOverview, MarketCapUnit};

    #[derive(Default)]
    struct StaticSource {
        overviews: HashMap<String, CompanyOverview>,
        unreachable: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MarketDataSource for StaticSource {
        async fn fetch_overview(&self, symbol: &str) -> FsResult<Option<CompanyOverview>> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.unreachable {
                return Err(FsError::HttpStatusError {
                    status: "503 Service Unavailable".to_string(),
                    request: format!("OVERVIEW {symbol}"),
                });
            }

            Ok(self.overviews.get(symbol).cloned())
        }
    }

    fn overview(symbol: &str, name: &str) -> CompanyOverview {
        CompanyOverview {
            symbol: symbol.to_string(),
            name: Some(name.to_string()),
            description: Some(format!("{name} description")),
            market_cap: Some(3_000_000_000_000.0),
            ebitda: Some(750_000_000_000.0),
            pe_ratio: Some(30.0),
            eps: Some(6.5),
            book_value: Some(4.4),
            dividend_yield: Some(0.44),
            return_on_equity: Some(151.3),
        }
    }

    fn reachable_source() -> StaticSource {
        let mut overviews = HashMap::new();
        overviews.insert("AAPL".to_string(), overview("AAPL", "Apple Inc."));
        overviews.insert("NFLX".to_string(), overview("NFLX", "Netflix Inc"));

        StaticSource {
            overviews,
            ..Default::default()
        }
    }

    fn insights(source: StaticSource) -> StockInsights {
        let reference = Arc::new(ReferenceData::bundled().unwrap());
        StockInsights::new(reference, Box::new(source))
    }

    #[tokio::test]
    async fn test_is_valid_symbol_case_insensitive() {
        let calls = Arc::new(AtomicUsize::new(0));
        let insights = insights(StaticSource {
            calls: calls.clone(),
            ..Default::default()
        });

        let symbols: Vec<String> = insights
            .reference()
            .stocks()
            .iter()
            .map(|s| s.symbol.to_string())
            .collect();
        for symbol in symbols {
            assert!(insights.is_valid_symbol(&symbol).await.unwrap());
            assert!(insights.is_valid_symbol(&symbol.to_lowercase()).await.unwrap());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_is_valid_symbol_external_fallback() {
        let insights = insights(reachable_source());

        assert!(insights.is_valid_symbol("nflx").await.unwrap());
        assert!(!insights.is_valid_symbol("NOTASYMBOL").await.unwrap());
        assert!(!insights.is_valid_symbol("  ").await.unwrap());

        let insights = insights.with_external_validation(false);
        assert!(!insights.is_valid_symbol("NFLX").await.unwrap());
    }

    #[tokio::test]
    async fn test_is_valid_symbol_source_unreachable() {
        let insights = insights(StaticSource {
            unreachable: true,
            ..Default::default()
        });

        assert!(insights.is_valid_symbol("AAPL").await.unwrap());
        assert!(insights.is_valid_symbol("NFLX").await.is_err());
    }

    #[tokio::test]
    async fn test_stock_detail() {
        let insights = insights(reachable_source());

        let detail = insights.stock_detail("AAPL").await.unwrap();
        assert_eq!(detail.symbol, "AAPL");
        assert_eq!(detail.company, "Apple Inc");
        assert_eq!(detail.curr_market_price, Some(195.0));
        assert_eq!(
            detail.market_cap.map(|m| m.unit),
            Some(MarketCapUnit::Usd)
        );
        assert_eq!(detail.roce, Some(25.0));
        assert_eq!(detail.face_value, None);

        let detail = insights.stock_detail("aapl").await.unwrap();
        assert_eq!(detail.symbol, "AAPL");
    }

    #[tokio::test]
    async fn test_stock_detail_dataset_figures() {
        let insights = insights(reachable_source());

        let detail = insights.stock_detail("reliance").await.unwrap();
        assert_eq!(detail.company, "Reliance Industries Ltd");
        assert_eq!(detail.curr_market_price, Some(2884.55));
        assert_eq!(
            detail.market_cap.map(|m| m.unit),
            Some(MarketCapUnit::Crores)
        );
        assert_eq!(detail.face_value, Some(10.0));
    }

    #[tokio::test]
    async fn test_stock_detail_external_symbol() {
        let insights = insights(reachable_source());

        let detail = insights.stock_detail("NFLX").await.unwrap();
        assert_eq!(detail.company, "Netflix Inc");
        assert_eq!(detail.face_value, None);
    }

    #[tokio::test]
    async fn test_stock_detail_not_found() {
        let insights = insights(reachable_source());

        let err = insights.stock_detail("NOTASYMBOL").await.unwrap_err();
        assert!(matches!(err, FsError::SymbolNotFound(ref s) if s == "NOTASYMBOL"));

        let insights = insights.with_external_validation(false);
        let err = insights.stock_detail("NFLX").await.unwrap_err();
        assert!(matches!(err, FsError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn test_stock_detail_source_unreachable() {
        let insights = insights(StaticSource {
            unreachable: true,
            ..Default::default()
        });

        match insights.stock_detail("AAPL").await {
            Err(FsError::DataUnavailable {
                symbol, partial, ..
            }) => {
                assert_eq!(symbol, "AAPL");
                let partial = partial.unwrap();
                assert_eq!(partial.company, "Apple Inc");
                assert_eq!(partial.market_cap, None);
                assert_eq!(partial.curr_market_price, None);
            }
            other => panic!("Unexpected result: {other:?}"),
        }

        match insights.stock_detail("NFLX").await {
            Err(FsError::DataUnavailable { partial, .. }) => assert!(partial.is_none()),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stock_detail_incomplete_live_data() {
        let mut source = StaticSource::default();
        source.overviews.insert(
            "AAPL".to_string(),
            CompanyOverview {
                symbol: "AAPL".to_string(),
                book_value: Some(4.4),
                ..Default::default()
            },
        );
        let insights = insights(source);

        match insights.stock_detail("AAPL").await {
            Err(FsError::DataUnavailable {
                message, partial, ..
            }) => {
                assert!(message.contains("market_cap"));
                assert_eq!(partial.unwrap().book_value, Some(4.4));
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_index_description() {
        let insights = insights(StaticSource::default());

        let description = insights.index_description("nifty 50").unwrap();
        assert_eq!(
            description,
            insights.reference().index("NIFTY 50").unwrap().description
        );

        let err = insights.index_description("NOT AN INDEX").unwrap_err();
        assert!(matches!(err, FsError::IndexNotFound(_)));
        assert!(!insights.is_valid_index("NOT AN INDEX"));
        assert!(insights.is_valid_index("sensex"));
    }

    #[test]
    fn test_index_detail() {
        let insights = insights(StaticSource::default());

        let index = insights.index_detail("S&P 500").unwrap();
        assert_eq!(index.market, Market::Us);
    }

    #[test]
    fn test_list_indices() {
        let insights = insights(StaticSource::default());

        let india = insights.list_indices(Market::India);
        let us = insights.list_indices(Market::Us);

        assert!(!india.is_empty());
        assert!(!us.is_empty());
        assert!(india.iter().all(|name| !us.contains(name)));

        let mut union: Vec<String> = Market::iter().flat_map(|m| insights.list_indices(m)).collect();
        let mut all = insights.index_names();
        union.sort();
        all.sort();
        assert_eq!(union, all);

        assert_eq!(india[0], "NIFTY 50");
        assert_eq!(us[0], "S&P 500");
    }
}
