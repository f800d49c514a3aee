use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ProportionError, Result};

/// What an asset's market cap is anchored to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reference {
    /// Close price observed when the reference market cap was recorded.
    Price(f64),
    /// Trading day whose close is looked up at run time.
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub ticker: String,
    pub reference: Reference,
    pub market_cap: f64,
}

impl AssetEntry {
    pub fn new(ticker: &str, reference: Reference, market_cap: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            reference,
            market_cap,
        }
    }
}

/// Asset entry as written in the portfolio document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawAssetEntry {
    #[serde(default)]
    ticker: Option<String>,
    #[serde(rename = "market cap", alias = "market_cap")]
    market_cap: f64,
    #[serde(default, rename = "close price", alias = "close_price", alias = "reference price")]
    close_price: Option<f64>,
    #[serde(default, alias = "reference date", alias = "reference_date")]
    date: Option<NaiveDate>,
}

impl RawAssetEntry {
    /// Validates the entry; the asset id stands in for a missing ticker.
    pub(crate) fn into_entry(self, id: &str) -> Result<AssetEntry> {
        let invalid = |reason: String| ProportionError::parse("portfolio", format!("asset '{id}': {reason}"));

        let ticker = self
            .ticker
            .as_deref()
            .unwrap_or(id)
            .trim()
            .to_string();
        if ticker.is_empty() {
            return Err(invalid("ticker is empty".to_string()));
        }

        if !self.market_cap.is_finite() || self.market_cap < 0.0 {
            return Err(invalid(format!(
                "market cap must be a non-negative number, got {}",
                self.market_cap
            )));
        }

        let reference = match (self.close_price, self.date) {
            (Some(price), None) => {
                if !price.is_finite() || price <= 0.0 {
                    return Err(ProportionError::InvalidReference { ticker, price });
                }
                Reference::Price(price)
            }
            (None, Some(date)) => Reference::Date(date),
            (Some(_), Some(_)) => {
                return Err(invalid("set either 'close price' or 'date', not both".to_string()))
            }
            (None, None) => return Err(invalid("missing 'close price' or 'date'".to_string())),
        };

        Ok(AssetEntry {
            ticker,
            reference,
            market_cap: self.market_cap,
        })
    }
}
