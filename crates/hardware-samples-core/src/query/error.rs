//! Error types and SNAFU context selectors for interpolation and tabulation.
//!
//! All variants are local to the single query that raised them: nothing is
//! retried and the store is never touched.

use chrono::{DateTime, Utc};
use snafu::prelude::*;

use crate::channel::Channel;

/// Errors from [`SampleStore::interpolate`] and [`SampleStore::tabulate`].
///
/// [`SampleStore::interpolate`]: crate::store::SampleStore::interpolate
/// [`SampleStore::tabulate`]: crate::store::SampleStore::tabulate
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum QueryError {
    /// The device id was never seen during ingestion.
    #[snafu(display("No hardware data for {device:?}"))]
    UnknownDevice {
        /// Requested device id.
        device: String,
    },

    /// The query instant is outside the window where the device's sampling
    /// density supports interpolation.
    #[snafu(display(
        "No interpolable hardware samples for {device:?} at {at}: \
         need {samples} >= 2 samples and {earliest_ms} <= t <= {latest_ms} (ms)"
    ))]
    InsufficientDensity {
        /// Requested device id.
        device: String,
        /// Requested instant.
        at: DateTime<Utc>,
        /// Number of samples the device has.
        samples: usize,
        /// Earliest interpolable instant, ms since epoch.
        earliest_ms: i64,
        /// Latest interpolable instant, ms since epoch.
        latest_ms: i64,
    },

    /// The device has no reading at all for one of the channels.
    #[snafu(display("Device {device:?} has no readings for channel {channel}"))]
    ChannelUnavailable {
        /// Requested device id.
        device: String,
        /// Channel without any concrete reading.
        channel: Channel,
    },

    /// Tabulation range with `from > to`.
    #[snafu(display("Invalid tabulation range: from={from}, to={to} (expect from <= to)"))]
    InvalidRange {
        /// Lower (inclusive) bound supplied by the caller.
        from: DateTime<Utc>,
        /// Upper (exclusive) bound supplied by the caller.
        to: DateTime<Utc>,
    },

    /// Tabulation asked for zero points.
    #[snafu(display("Invalid tabulation count {count} (expect count >= 1)"))]
    InvalidCount {
        /// Requested point count.
        count: usize,
    },
}

/// Discriminant of a [`QueryError`], for callers that only need to branch on
/// the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryErrorKind {
    /// See [`QueryError::UnknownDevice`].
    UnknownDevice,
    /// See [`QueryError::InsufficientDensity`].
    InsufficientDensity,
    /// See [`QueryError::ChannelUnavailable`].
    ChannelUnavailable,
    /// See [`QueryError::InvalidRange`] and [`QueryError::InvalidCount`].
    InvalidRequest,
}

impl QueryError {
    /// The kind of failure.
    pub fn kind(&self) -> QueryErrorKind {
        match self {
            QueryError::UnknownDevice { .. } => QueryErrorKind::UnknownDevice,
            QueryError::InsufficientDensity { .. } => QueryErrorKind::InsufficientDensity,
            QueryError::ChannelUnavailable { .. } => QueryErrorKind::ChannelUnavailable,
            QueryError::InvalidRange { .. } | QueryError::InvalidCount { .. } => {
                QueryErrorKind::InvalidRequest
            }
        }
    }
}

/// Result alias for queries.
pub type QueryResult<T> = Result<T, QueryError>;
