use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};

use crate::assets::{AssetEntry, Reference};
use crate::error::{ProportionError, Result};
use crate::portfolio::Portfolio;
use crate::proportions::{normalize, MarketCaps, Proportions};
use crate::quotes::{historical_price, HistoryProvider, QuoteProvider};

/// Scales reference market caps by current / reference price.
#[derive(Clone)]
pub struct Estimator {
    quotes: Arc<dyn QuoteProvider>,
    history: Arc<dyn HistoryProvider>,
    jobs: usize,
}

impl Estimator {
    pub fn new(quotes: Arc<dyn QuoteProvider>, history: Arc<dyn HistoryProvider>) -> Self {
        Self {
            quotes,
            history,
            jobs: 1,
        }
    }

    /// Estimator whose quotes and history come from one source.
    pub fn from_source<P>(source: Arc<P>) -> Self
    where
        P: QuoteProvider + HistoryProvider + 'static,
    {
        Self::new(source.clone(), source)
    }

    /// Number of assets looked up at once. 1 (the default) is strictly sequential.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Reference price of `entry`, resolving dates through the history source.
    pub async fn reference_price(&self, entry: &AssetEntry) -> Result<f64> {
        let price = match entry.reference {
            Reference::Price(price) => price,
            Reference::Date(date) => historical_price(self.history.as_ref(), &entry.ticker, date).await?,
        };
        if !price.is_finite() || price <= 0.0 {
            return Err(ProportionError::InvalidReference {
                ticker: entry.ticker.clone(),
                price,
            });
        }
        Ok(price)
    }

    pub async fn market_cap(&self, entry: &AssetEntry) -> Result<f64> {
        let reference = self.reference_price(entry).await?;
        let current = self.quotes.current_price(&entry.ticker).await?;
        let cap = entry.market_cap * (current / reference);
        if !cap.is_finite() {
            return Err(ProportionError::Overflow(format!(
                "estimated cap of {} is {cap}",
                entry.ticker
            )));
        }

        tracing::debug!(
            ticker = %entry.ticker,
            reference,
            current,
            cap,
            "estimated market cap"
        );
        Ok(cap)
    }

    /// Market cap of every asset, in portfolio order. Stops at the first failing asset.
    pub async fn market_caps(&self, portfolio: &Portfolio) -> Result<MarketCaps> {
        let caps: Vec<(String, f64)> = stream::iter(portfolio.iter())
            .map(|(id, entry)| async move {
                let cap = self.market_cap(entry).await?;
                Ok::<_, ProportionError>((id.to_string(), cap))
            })
            .buffered(self.jobs)
            .try_collect()
            .await?;
        Ok(MarketCaps::from(caps))
    }

    pub async fn market_proportions(&self, portfolio: &Portfolio) -> Result<Proportions> {
        let caps = self.market_caps(portfolio).await?;
        normalize(&caps)
    }
}
