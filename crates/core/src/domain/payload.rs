use crate::error::{Error, Result};
use crate::time::{format_date_key, parse_date_key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Daily holdings payload as produced by the scraper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationsPayload {
    pub latest_date: String,
    /// Absent means nothing is held today.
    #[serde(default)]
    pub stock_tickers: Vec<String>,
    /// Passed through untouched.
    #[serde(default)]
    pub dividend_yield: String,
}

/// A validated payload: canonical date key and a unique, sorted ticker set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyIngest {
    pub date: String,
    pub tickers: Vec<String>,
    pub dividend_yield: String,
}

impl RotationsPayload {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::storage(path, e))?;
        Self::from_slice(&bytes, path)
    }

    pub fn from_slice(bytes: &[u8], origin: &Path) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|source| Error::Decode {
            what: "rotations payload",
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn validate_and_into_ingest(self) -> Result<DailyIngest> {
        let date = parse_date_key(self.latest_date.trim()).ok_or_else(|| {
            Error::InvalidPayload(format!(
                "latestDate must be YYYY-MM-DD (got {:?})",
                self.latest_date
            ))
        })?;

        let mut tickers = BTreeSet::new();
        for raw in self.stock_tickers {
            let ticker = raw.trim();
            if ticker.is_empty() {
                return Err(Error::InvalidPayload(
                    "stockTickers must not contain empty symbols".to_string(),
                ));
            }
            tickers.insert(ticker.to_string());
        }

        Ok(DailyIngest {
            date: format_date_key(date),
            tickers: tickers.into_iter().collect(),
            dividend_yield: self.dividend_yield,
        })
    }
}
