//! Query side of the store: point interpolation and range tabulation.
//!
//! Both operations are implemented as `&self` methods on
//! [`SampleStore`](crate::store::SampleStore) and never mutate it, so any
//! number of queries may run concurrently against one populated store.

pub mod error;
pub mod interpolate;
pub mod label;
pub mod tabulate;

pub use error::{QueryError, QueryErrorKind, QueryResult};
pub use tabulate::{Tabulation, TabulationRequest};
