//! Estimate the current market-value proportions of the assets in a portfolio.
//!
//! Each holding carries a reference market cap anchored to a close price or a
//! trading date. The cap is scaled by `current / reference` price and the
//! scaled caps are normalized into proportions.

pub mod assets;
pub mod error;
pub mod estimate;
pub mod fixture;
pub mod output;
pub mod portfolio;
pub mod proportions;
pub mod quotes;
pub mod yahoo;

pub use assets::{AssetEntry, Reference};
pub use error::{ProportionError, Result};
pub use estimate::Estimator;
pub use fixture::PriceBook;
pub use output::{render, OutputFormat};
pub use portfolio::{Portfolio, PortfolioBuilder};
pub use proportions::{normalize, MarketCaps, Proportions};
pub use quotes::{historical_price, DailyRecord, HistoryProvider, QuoteProvider};
pub use yahoo::YahooProvider;
