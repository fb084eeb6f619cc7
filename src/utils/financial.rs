use crate::error::{FsError, FsResult};

pub const RULE_OF_72: f64 = 72.0;
pub const RULE_OF_114: f64 = 114.0;

/// Years to double an investment at `interest` percent a year, by the Rule of 72.
pub fn years_to_double_money(interest: f64) -> FsResult<f64> {
    ensure_positive("interest", interest)?;

    Ok(RULE_OF_72 / interest)
}

/// Years to triple an investment at `interest` percent a year, by the Rule of 114.
pub fn years_to_triple_money(interest: f64) -> FsResult<f64> {
    ensure_positive("interest", interest)?;

    Ok(RULE_OF_114 / interest)
}

pub fn earnings_per_share(earnings: f64, no_of_shares: u64) -> FsResult<f64> {
    ensure_finite("earnings", earnings)?;
    if no_of_shares == 0 {
        return Err(FsError::invalid_argument(
            "The argument `no_of_shares` should be greater than 0",
        ));
    }

    Ok(earnings / no_of_shares as f64)
}

pub fn pe_ratio(earnings: f64, no_of_shares: u64, current_market_price: f64) -> FsResult<f64> {
    ensure_positive("current_market_price", current_market_price)?;

    let eps = earnings_per_share(earnings, no_of_shares)?;
    if eps == 0.0 {
        return Err(FsError::invalid_argument(
            "The earnings per share is 0, P/E ratio is undefined",
        ));
    }

    Ok(current_market_price / eps)
}

/// Return on equity, in percent.
pub fn roe_ratio(net_income: f64, shareholders_equity: f64) -> FsResult<f64> {
    ensure_positive("shareholders_equity", shareholders_equity)?;
    ensure_non_negative("net_income", net_income)?;

    Ok(net_income / shareholders_equity * 100.0)
}

/// Return on capital employed, in percent.
pub fn roce_ratio(ebit: f64, capital_employed: f64) -> FsResult<f64> {
    ensure_positive("capital_employed", capital_employed)?;
    ensure_non_negative("ebit", ebit)?;

    Ok(ebit / capital_employed * 100.0)
}

/// Debt to equity, in percent.
pub fn debt_to_equity(total_debt: f64, shareholders_equity: f64) -> FsResult<f64> {
    ensure_positive("shareholders_equity", shareholders_equity)?;
    ensure_non_negative("total_debt", total_debt)?;

    Ok(total_debt / shareholders_equity * 100.0)
}

pub fn dividend_yield_percentage(annual_dividend: f64, price_per_share: f64) -> FsResult<f64> {
    ensure_finite("annual_dividend", annual_dividend)?;
    ensure_positive("price_per_share", price_per_share)?;

    Ok(annual_dividend / price_per_share * 100.0)
}

/// Dividend amount per share paid at `dividend_yield_percentage` of `price_per_share`.
pub fn dividend_yield(dividend_yield_percentage: f64, price_per_share: f64) -> FsResult<f64> {
    ensure_positive("price_per_share", price_per_share)?;
    ensure_non_negative("dividend_yield_percentage", dividend_yield_percentage)?;

    Ok(price_per_share / 100.0 * dividend_yield_percentage)
}

pub fn price_to_book_ratio(market_price: f64, book_value_per_share: f64) -> FsResult<f64> {
    ensure_finite("market_price", market_price)?;
    ensure_positive("book_value_per_share", book_value_per_share)?;

    Ok(market_price / book_value_per_share)
}

fn ensure_finite(name: &str, value: f64) -> FsResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FsError::invalid_argument(format!(
            "The argument `{name}` should be a finite number"
        )))
    }
}

fn ensure_positive(name: &str, value: f64) -> FsResult<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(FsError::invalid_argument(format!(
            "The argument `{name}` should be a positive number"
        )))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> FsResult<()> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(FsError::invalid_argument(format!(
            "The argument `{name}` should be non-negative"
        )))
    }
}
