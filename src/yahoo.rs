use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use yahoo_finance_api::{Quote, YahooConnector};

use crate::error::{ProportionError, Result};
use crate::quotes::{DailyRecord, HistoryProvider, QuoteProvider};

/// Yahoo Finance backed price source.
pub struct YahooProvider {
    client: YahooConnector,
}

impl std::fmt::Debug for YahooProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "YahooProvider")
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooProvider {
    pub fn new() -> Self {
        Self {
            client: YahooConnector::new(),
        }
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    async fn current_price(&self, ticker: &str) -> Result<f64> {
        tracing::debug!(ticker, "fetching latest quote");
        let res = self
            .client
            .get_latest_quotes(ticker, "1d")
            .await
            .map_err(|e| ProportionError::quote(ticker, e))?;
        let quote = res.last_quote().map_err(|e| ProportionError::quote(ticker, e))?;

        if !quote.close.is_finite() || quote.close <= 0.0 {
            return Err(ProportionError::quote(
                ticker,
                format!("upstream returned unusable price {}", quote.close),
            ));
        }
        tracing::debug!(ticker, price = quote.close, "latest quote");
        Ok(quote.close)
    }
}

#[async_trait]
impl HistoryProvider for YahooProvider {
    async fn daily_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyRecord>> {
        let res = self
            .client
            .get_quote_history(ticker, to_offset(ticker, start)?, to_offset(ticker, end)?)
            .await
            .map_err(|e| ProportionError::quote(ticker, e))?;
        let quotes = res.quotes().map_err(|e| ProportionError::quote(ticker, e))?;
        // exchange offset from UTC in seconds
        let gmtoffset = res.metadata().map(|meta| i64::from(meta.gmtoffset)).unwrap_or(0);

        quotes
            .iter()
            .map(|q| record_from_quote(ticker, q, gmtoffset))
            .collect()
    }
}

fn to_offset(ticker: &str, at: DateTime<Utc>) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(at.timestamp()).map_err(|e| ProportionError::quote(ticker, e))
}

/// Daily bars are stamped at the session open in UTC. Shifted by the
/// exchange's `gmtoffset`, the calendar day of that stamp is the trading date.
fn record_from_quote(ticker: &str, quote: &Quote, gmtoffset: i64) -> Result<DailyRecord> {
    let local = (quote.timestamp as i64).saturating_add(gmtoffset);
    let stamp = DateTime::from_timestamp(local, 0).ok_or_else(|| {
        ProportionError::quote(ticker, format!("invalid timestamp {}", quote.timestamp))
    })?;

    Ok(DailyRecord {
        date: stamp.date_naive(),
        open: quote.open,
        high: quote.high,
        low: quote.low,
        close: quote.close,
        adj_close: quote.adjclose,
        volume: quote.volume,
    })
}
