//! Price source capabilities.
//!
//! The estimator only ever sees these two traits, so the upstream quote
//! service (or an offline price book) can be swapped without touching the
//! computation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{ProportionError, Result};

/// Length of the query window opened at midnight UTC of the requested day.
/// 6.5 hours, one regular trading session.
pub const SESSION_WINDOW_SECS: i64 = 23_400;

/// One row of a daily price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

impl DailyRecord {
    /// Record where every price field is `close`.
    pub fn flat(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 0,
        }
    }
}

/// Live market prices.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Current price of `ticker`.
    ///
    /// Fails with [`ProportionError::Quote`] when the upstream reports an
    /// error for the ticker or cannot be reached.
    async fn current_price(&self, ticker: &str) -> Result<f64>;
}

/// Daily price history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Daily records of `ticker` stamped within `[start, end]`.
    async fn daily_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailyRecord>>;
}

/// Query window for the trading day `date`.
pub fn session_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::seconds(SESSION_WINDOW_SECS))
}

/// Close price of `ticker` on `date`.
///
/// Only a record whose date equals `date` is accepted; neighbouring days the
/// upstream may include in the window are ignored.
pub async fn historical_price(
    history: &dyn HistoryProvider,
    ticker: &str,
    date: NaiveDate,
) -> Result<f64> {
    let (start, end) = session_window(date);
    tracing::debug!(ticker, %start, %end, "requesting daily history");

    let records = history.daily_history(ticker, start, end).await?;
    let close = select_close(&records, ticker, date)?;

    tracing::debug!(ticker, %date, close, "historical close");
    Ok(close)
}

fn select_close(records: &[DailyRecord], ticker: &str, date: NaiveDate) -> Result<f64> {
    let mut matching = records.iter().filter(|record| record.date == date);
    let record = matching.next().ok_or_else(|| ProportionError::PriceNotFound {
        ticker: ticker.to_string(),
        date,
    })?;

    let extra = matching.count();
    if extra > 0 {
        tracing::warn!(ticker, %date, extra, "several daily records for one date, using the first");
    }
    Ok(record.close)
}
