//! Core engine for synthesizing multi-channel hardware samples.
//!
//! Devices report a fixed set of measurement channels, each recorded in its
//! own sparse CSV file. This crate provides:
//!
//! - The closed [`Channel`] set and the [`SparseSample`] / [`DenseSample`]
//!   types (`channel` and `sample` modules).
//! - An immutable, per-device [`SampleStore`] built once from a directory of
//!   channel files (`store` module).
//! - Density-bounded interpolation of a dense sample at an arbitrary instant,
//!   and evenly spaced tabulation of a device over a time range (`query`
//!   module).
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use hardware_samples_core::{SampleStore, TabulationRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SampleStore::populate("samples").await?;
//! let request = TabulationRequest::new(
//!     "fan1",
//!     Utc.timestamp_millis_opt(1_000).unwrap(),
//!     Utc.timestamp_millis_opt(4_000).unwrap(),
//!     3,
//! );
//! for (label, sample) in store.tabulate(&request)?.iter() {
//!     println!("{label}: {:?}", sample);
//! }
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs)]

pub mod channel;
pub mod query;
pub mod sample;
pub mod store;

pub use channel::Channel;
pub use query::{QueryError, QueryErrorKind, Tabulation, TabulationRequest};
pub use sample::{DenseSample, SparseSample};
pub use store::{DeviceSeries, IngestError, SampleStore};
