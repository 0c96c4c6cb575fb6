//! # rustxplore
//!
//! IEEE Xplore metadata crawler: paginated search, record normalization,
//! JSONL/CSV export.
//!
//! ## Modules
//!
//! - [`ieee`] - IEEE Xplore REST search client and paginated fetcher
//! - [`record`] - Canonical record schema and normalizer
//! - [`raw`] - Tolerant accessors over raw search records
//! - [`output`] - JSONL / CSV writers
//! - [`pipeline`] - Fetch-then-save orchestration
//! - [`config`] - Crawler configuration
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustxplore::{config::XploreConfig, ieee::{FetchOptions, Fetcher}};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = Fetcher::from_config(XploreConfig::default())?;
//!     let records = fetcher.fetch("machine learning", &FetchOptions::default()).await?;
//!     println!("Found {} results", records.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ieee;
pub mod output;
pub mod pipeline;
pub mod raw;
pub mod record;

pub use error::{Result, XploreError};
pub use record::{normalize, CanonicalRecord};
