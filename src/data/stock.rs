use std::fmt::Display;

use serde::Serialize;

use crate::reference::stock::StockRecord;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, strum::Display)]
pub enum MarketCapUnit {
    #[strum(serialize = "crores")]
    #[serde(rename = "crores")]
    Crores,

    #[strum(serialize = "USD")]
    #[serde(rename = "USD")]
    Usd,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketCap {
    pub amount: f64,
    pub unit: MarketCapUnit,
}

/// Provider-neutral company overview, every figure may be missing.
/// Yields and returns are in percent, like the dataset figures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompanyOverview {
    pub symbol: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub market_cap: Option<f64>,
    pub ebitda: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub eps: Option<f64>,
    pub book_value: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub return_on_equity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StockDetail {
    pub symbol: String,
    pub company: String,
    pub about: Option<String>,
    pub market_cap: Option<MarketCap>,
    pub curr_market_price: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub book_value: Option<f64>,
    pub dividend: Option<f64>,
    pub roce: Option<f64>,
    pub roe: Option<f64>,
    pub face_value: Option<f64>,
}

impl Display for MarketCap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

impl CompanyOverview {
    /// Price implied by P/E times EPS.
    pub fn market_price(&self) -> Option<f64> {
        match (self.pe_ratio, self.eps) {
            (Some(pe), Some(eps)) => Some(pe * eps),
            _ => None,
        }
    }

    /// EBITDA over market capitalization, in percent.
    pub fn roce(&self) -> Option<f64> {
        match (self.ebitda, self.market_cap) {
            (Some(ebitda), Some(market_cap)) if market_cap > 0.0 => {
                Some(ebitda / market_cap * 100.0)
            }
            _ => None,
        }
    }
}

impl StockDetail {
    pub fn from_record(record: &StockRecord) -> Self {
        let snapshot = &record.snapshot;

        Self {
            symbol: record.symbol.clone(),
            company: record.company.clone(),
            about: record.about.clone(),
            market_cap: snapshot.market_cap_crores.map(|amount| MarketCap {
                amount,
                unit: MarketCapUnit::Crores,
            }),
            curr_market_price: snapshot.curr_market_price,
            pe_ratio: snapshot.pe_ratio,
            book_value: snapshot.book_value,
            dividend: snapshot.dividend,
            roce: snapshot.roce,
            roe: snapshot.roe,
            face_value: record.face_value,
        }
    }

    pub fn from_overview(overview: &CompanyOverview) -> Self {
        let mut detail = Self {
            symbol: overview.symbol.clone(),
            company: overview.name.clone().unwrap_or_default(),
            about: overview.description.clone(),
            market_cap: None,
            curr_market_price: None,
            pe_ratio: None,
            book_value: None,
            dividend: None,
            roce: None,
            roe: None,
            face_value: None,
        };
        detail.merge_overview(overview);

        detail
    }

    /// Overlays live figures, keeping the existing value wherever the overview has none.
    pub fn merge_overview(&mut self, overview: &CompanyOverview) {
        if let Some(amount) = overview.market_cap {
            self.market_cap = Some(MarketCap {
                amount,
                unit: MarketCapUnit::Usd,
            });
        }

        self.curr_market_price = overview.market_price().or(self.curr_market_price);
        self.pe_ratio = overview.pe_ratio.or(self.pe_ratio);
        self.book_value = overview.book_value.or(self.book_value);
        self.dividend = overview.dividend_yield.or(self.dividend);
        self.roce = overview.roce().or(self.roce);
        self.roe = overview.return_on_equity.or(self.roe);

        if self.about.is_none() {
            self.about = overview.description.clone();
        }
    }

    /// Names of the figures a complete detail must carry but this one lacks.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = vec![];

        if self.market_cap.is_none() {
            missing.push("market_cap");
        }
        if self.curr_market_price.is_none() {
            missing.push("curr_market_price");
        }

        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview() -> CompanyOverview {
        CompanyOverview {
            symbol: "IBM".to_string(),
            name: Some("International Business Machines".to_string()),
            description: Some("IBM provides hybrid cloud.".to_string()),
            market_cap: Some(200_000_000_000.0),
            ebitda: Some(50_000_000_000.0),
            pe_ratio: Some(20.0),
            eps: Some(9.5),
            book_value: Some(26.08),
            dividend_yield: Some(3.11),
            return_on_equity: Some(36.2),
        }
    }

    #[test]
    fn test_company_overview_derived_figures() {
        let overview = overview();

        assert_eq!(overview.market_price(), Some(190.0));
        assert_eq!(overview.roce(), Some(25.0));

        let without_eps = CompanyOverview {
            eps: None,
            market_cap: Some(0.0),
            ..overview
        };
        assert_eq!(without_eps.market_price(), None);
        assert_eq!(without_eps.roce(), None);
    }

    #[test]
    fn test_stock_detail_from_overview() {
        let detail = StockDetail::from_overview(&overview());

        assert_eq!(detail.symbol, "IBM");
        assert_eq!(detail.company, "International Business Machines");
        assert_eq!(detail.curr_market_price, Some(190.0));
        assert_eq!(detail.market_cap.as_ref().map(|m| m.unit), Some(MarketCapUnit::Usd));
        assert_eq!(detail.face_value, None);
        assert!(detail.missing_fields().is_empty());
    }

    #[test]
    fn test_merge_overview_keeps_existing_values() {
        let mut detail = StockDetail::from_overview(&overview());
        detail.merge_overview(&CompanyOverview {
            symbol: "IBM".to_string(),
            book_value: Some(30.0),
            ..Default::default()
        });

        assert_eq!(detail.book_value, Some(30.0));
        assert_eq!(detail.pe_ratio, Some(20.0));
        assert_eq!(detail.curr_market_price, Some(190.0));
    }

    #[test]
    fn test_market_cap_display() {
        let market_cap = MarketCap {
            amount: 1951234.0,
            unit: MarketCapUnit::Crores,
        };

        assert_eq!(market_cap.to_string(), "1951234 crores");
    }
}
