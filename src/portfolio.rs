use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::assets::{AssetEntry, RawAssetEntry, Reference};
use crate::error::{ProportionError, Result};

/// Holdings keyed by asset id, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    positions: Vec<(String, AssetEntry)>,
}

impl Portfolio {
    pub fn builder() -> PortfolioBuilder {
        PortfolioBuilder::new()
    }

    /// Reads and validates a YAML portfolio file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProportionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parses a YAML portfolio document. Whitespace-only text is an empty portfolio.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let document: Value =
            serde_yaml::from_str(text).map_err(|e| ProportionError::parse("portfolio", e))?;
        let mapping = match document {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            other => {
                return Err(ProportionError::parse(
                    "portfolio",
                    format!("expected a mapping of assets, found {}", kind(&other)),
                ))
            }
        };

        let mut builder = PortfolioBuilder::new();
        for (key, value) in mapping {
            let id = asset_id(&key)?;
            let raw: RawAssetEntry = serde_yaml::from_value(value)
                .map_err(|e| ProportionError::parse("portfolio", format!("asset '{id}': {e}")))?;
            let entry = raw.into_entry(&id)?;
            builder = builder.asset(&id, entry);
        }
        let portfolio = builder.build()?;

        tracing::info!(assets = portfolio.len(), "loaded portfolio");
        Ok(portfolio)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetEntry)> {
        self.positions.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn get(&self, id: &str) -> Option<&AssetEntry> {
        self.positions
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|(id, entry)| {
                    let mut entry = entry.clone();
                    entry.market_cap *= factor;
                    (id.clone(), entry)
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PortfolioBuilder {
    positions: Vec<(String, AssetEntry)>,
}

impl PortfolioBuilder {
    pub fn new() -> PortfolioBuilder {
        PortfolioBuilder::default()
    }

    pub fn asset(mut self, id: &str, entry: AssetEntry) -> Self {
        self.positions.push((id.to_string(), entry));
        self
    }

    /// Holding anchored to a known reference close price.
    pub fn priced(self, id: &str, ticker: &str, market_cap: f64, close_price: f64) -> Self {
        self.asset(id, AssetEntry::new(ticker, Reference::Price(close_price), market_cap))
    }

    pub fn build(self) -> Result<Portfolio> {
        for (i, (id, _)) in self.positions.iter().enumerate() {
            if self.positions[..i].iter().any(|(seen, _)| seen == id) {
                return Err(ProportionError::parse(
                    "portfolio",
                    format!("duplicate asset '{id}'"),
                ));
            }
        }
        Ok(Portfolio {
            positions: self.positions,
        })
    }
}

fn asset_id(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ProportionError::parse(
            "portfolio",
            format!("asset ids must be scalars, found {}", kind(other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
