//! Market and macro data source clients for barometer.
//!
//! This crate provides the two external collaborators of the pipeline:
//!
//! - [`YahooClient`]: daily closes from the Yahoo Finance chart API
//! - [`FredClient`]: macro series from the
//!   [FRED](https://fred.stlouisfed.org/) API
//!
//! Both are exposed to the pipeline through the [`MarketDataSource`] and
//! [`MacroDataSource`] traits so tests can substitute in-memory sources.
//!
//! # Usage
//!
//! ```rust,ignore
//! use barometer_sources::{FredClient, MacroDataSource, MarketDataSource, YahooClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fred = FredClient::new(std::env::var("FRED_API_KEY")?);
//!     let walcl = fred.fetch_series("WALCL", start, end).await?;
//!
//!     let yahoo = YahooClient::new();
//!     let closes = yahoo.fetch_closes(&["SPY", "^VIX"], start, end).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # API Key
//!
//! [`FredClient`] takes the key explicitly. The `barometer` binary reads it
//! from `--fred-api-key` or `FRED_API_KEY` (a `.env` file is honoured).

mod error;
mod fred;
mod source;
mod types;
mod yahoo;

pub use error::SourceError;
pub use fred::FredClient;
pub use source::{MacroDataSource, MarketDataSource};
pub use types::*;
pub use yahoo::YahooClient;

/// Result type for data source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
