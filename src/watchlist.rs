//! Watchlist loading from the tickers CSV.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::{error, info};

use crate::error::AppError;

/// One configured ticker with its display number and portfolio weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Number")]
    pub number: i64,
    #[serde(rename = "Weight")]
    pub weight: f64,
}

/// Load the watchlist from `path`.
///
/// A missing file is logged and yields an empty watchlist so the server can
/// still start. Any other read or parse failure is returned.
pub fn load_watchlist(path: impl AsRef<Path>) -> Result<Vec<WatchlistEntry>, AppError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!("Watchlist file {} not found, serving an empty watchlist", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let entries = parse_watchlist(file)?;
    info!("Loaded {} watchlist entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse watchlist rows (header `Ticker,Number,Weight`; extra columns ignored).
pub fn parse_watchlist<R: Read>(reader: R) -> Result<Vec<WatchlistEntry>, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in rdr.deserialize() {
        let entry: WatchlistEntry = record?;
        entries.push(entry);
    }
    Ok(entries)
}
