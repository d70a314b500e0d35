pub mod traits;
pub mod types;

pub mod yahoo;
mod yahoo_models;

pub use traits::MarketDataClient;
pub use types::{Quote, RawBar};
pub use yahoo::YahooClient;

#[cfg(test)]
pub(crate) mod mock;
