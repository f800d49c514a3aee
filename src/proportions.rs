use polars::prelude::{df, DataFrame, PolarsResult};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ProportionError, Result};

/// Ordered `(asset id, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weights {
    entries: Vec<(String, f64)>,
}

/// Estimated market cap per asset.
pub type MarketCaps = Weights;

/// Share of total market cap per asset; values sum to 1.
pub type Proportions = Weights;

impl Weights {
    pub fn get(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    /// Two-column frame: `asset`, `proportion`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let assets: Vec<&str> = self.entries.iter().map(|(id, _)| id.as_str()).collect();
        let values: Vec<f64> = self.entries.iter().map(|(_, value)| *value).collect();
        df!(
            "asset" => assets,
            "proportion" => values
        )
    }
}

impl From<Vec<(String, f64)>> for Weights {
    fn from(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, f64)> for Weights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Weights {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

/// Divides every market cap by the total.
///
/// An empty mapping is [`ProportionError::EmptyPortfolio`]; a total of exactly
/// zero is [`ProportionError::DivideByZero`]; a total beyond `f64` range is
/// [`ProportionError::Overflow`].
pub fn normalize(caps: &MarketCaps) -> Result<Proportions> {
    if caps.is_empty() {
        return Err(ProportionError::EmptyPortfolio);
    }
    let total = caps.total();
    if total == 0.0 {
        return Err(ProportionError::DivideByZero);
    }
    if !total.is_finite() {
        return Err(ProportionError::Overflow(format!(
            "total of {} market caps is {total}",
            caps.len()
        )));
    }
    tracing::debug!(assets = caps.len(), total, "normalizing market caps");

    Ok(caps
        .iter()
        .map(|(id, cap)| (id.to_string(), cap / total))
        .collect())
}
