//! Offline price source read from a YAML price book.
//!
//! ```yaml
//! current:
//!   VTI: 200.0
//! history:
//!   VTI:
//!     2021-01-04: 190.0
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::{ProportionError, Result};
use crate::quotes::{DailyRecord, HistoryProvider, QuoteProvider};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceBook {
    #[serde(default)]
    current: HashMap<String, f64>,
    #[serde(default)]
    history: HashMap<String, BTreeMap<NaiveDate, f64>>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProportionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| ProportionError::parse("price book", e))
    }

    pub fn with_current(mut self, ticker: &str, price: f64) -> Self {
        self.current.insert(ticker.to_string(), price);
        self
    }

    pub fn with_close(mut self, ticker: &str, date: NaiveDate, close: f64) -> Self {
        self.history
            .entry(ticker.to_string())
            .or_default()
            .insert(date, close);
        self
    }
}

#[async_trait]
impl QuoteProvider for PriceBook {
    async fn current_price(&self, ticker: &str) -> Result<f64> {
        match self.current.get(ticker) {
            Some(&price) if price.is_finite() && price > 0.0 => Ok(price),
            Some(&price) => Err(ProportionError::quote(
                ticker,
                format!("unusable price {price} in price book"),
            )),
            None => Err(ProportionError::quote(ticker, "no current price in price book")),
        }
    }
}

#[async_trait]
impl HistoryProvider for PriceBook {
    async fn daily_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyRecord>> {
        let Some(series) = self.history.get(ticker) else {
            return Ok(Vec::new());
        };
        // Records are stamped at midnight UTC of their date.
        Ok(series
            .iter()
            .filter(|(date, _)| {
                let stamp = date.and_time(chrono::NaiveTime::MIN).and_utc();
                start <= stamp && stamp <= end
            })
            .map(|(&date, &close)| DailyRecord::flat(date, close))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::{historical_price, session_window};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    const BOOK: &str = r#"
current:
  VTI: 200.0
  BND: 85.5
history:
  VTI:
    2021-01-04: 190.0
    2021-01-05: 191.0
"#;

    #[tokio::test]
    async fn test_current_price() {
        let book = PriceBook::from_yaml(BOOK).unwrap();
        assert_eq!(book.current_price("BND").await.unwrap(), 85.5);
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_quote_error() {
        let book = PriceBook::from_yaml(BOOK).unwrap();
        let err = book.current_price("ZZZZ").await.unwrap_err();
        assert!(matches!(err, ProportionError::Quote { ref ticker, .. } if ticker == "ZZZZ"));
    }

    #[tokio::test]
    async fn test_history_window_selects_one_day() {
        let book = PriceBook::from_yaml(BOOK).unwrap();
        let (start, end) = session_window(day(4));
        let records = book.daily_history("VTI", start, end).await.unwrap();
        assert_eq!(records, vec![DailyRecord::flat(day(4), 190.0)]);

        assert_eq!(historical_price(&book, "VTI", day(5)).await.unwrap(), 191.0);
    }

    #[tokio::test]
    async fn test_history_gap_is_price_not_found() {
        let book = PriceBook::new().with_close("VTI", day(4), 190.0);
        let err = historical_price(&book, "VTI", day(6)).await.unwrap_err();
        assert!(matches!(err, ProportionError::PriceNotFound { .. }));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = PriceBook::from_yaml("quotes:\n  VTI: 1.0\n").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse price book"));
    }
}
