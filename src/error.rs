use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can abort a proportions run.
///
/// Nothing in the pipeline recovers locally: the first error ends the run and
/// is reported by `main`.
#[derive(Debug, Error)]
pub enum ProportionError {
    /// The portfolio or price book document is malformed or violates the schema.
    #[error("failed to parse {document}: {message}")]
    Parse { document: String, message: String },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The upstream quote source failed for a ticker.
    #[error("quote lookup for {ticker} failed: {message}")]
    Quote { ticker: String, message: String },

    /// No daily record carries the requested date.
    #[error("no price found for {ticker} on {date}")]
    PriceNotFound { ticker: String, date: NaiveDate },

    /// A reference price that cannot be divided by.
    #[error("invalid reference price {price} for {ticker}")]
    InvalidReference { ticker: String, price: f64 },

    #[error("total market cap is zero")]
    DivideByZero,

    /// A market cap or their total left the range of `f64`.
    #[error("market cap overflow: {0}")]
    Overflow(String),

    #[error("portfolio has no assets")]
    EmptyPortfolio,
}

impl ProportionError {
    pub fn quote(ticker: &str, message: impl ToString) -> Self {
        ProportionError::Quote {
            ticker: ticker.to_string(),
            message: message.to_string(),
        }
    }

    pub fn parse(document: &str, message: impl ToString) -> Self {
        ProportionError::Parse {
            document: document.to_string(),
            message: message.to_string(),
        }
    }

    /// Process exit code for this error: 2 for bad input documents, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProportionError::Parse { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProportionError>;
