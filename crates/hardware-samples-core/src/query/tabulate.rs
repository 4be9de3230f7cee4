//! Evenly spaced tabulation over a half-open time range.
//!
//! [`SampleStore::tabulate`] splits `[from, to)` into `count` steps of
//! `(to - from) / count` (whole nanoseconds) and interpolates the device at
//! `from, from + step, from + 2*step, ...`, producing exactly `count`
//! points. Because `step * count <= to - from`, every point is before `to`.
//!
//! Points are interpolated in parallel on the rayon pool; results are
//! assembled in timestamp order and the first failure in that order fails
//! the whole tabulation. Points later than a known failure are skipped.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::query::error::{InvalidCountSnafu, InvalidRangeSnafu, QueryResult, UnknownDeviceSnafu};
use crate::query::label::format_label;
use crate::sample::DenseSample;
use crate::store::SampleStore;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// A request to tabulate one device over `[from, to)`.
///
/// The serialized shape is `{"id": ..., "from": ..., "to": ..., "count": ...}`
/// with RFC 3339 instants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TabulationRequest {
    /// Device id.
    pub id: String,
    /// Inclusive start of the range.
    pub from: DateTime<Utc>,
    /// Exclusive end of the range.
    pub to: DateTime<Utc>,
    /// Number of points to produce.
    pub count: usize,
}

impl TabulationRequest {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, from: DateTime<Utc>, to: DateTime<Utc>, count: usize) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            count,
        }
    }
}

/// Insertion-ordered mapping from label to interpolated sample.
///
/// Inserting a label that is already present replaces its sample in place
/// (last write wins); this only happens when two instants render to the same
/// label. Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tabulation {
    entries: IndexMap<String, DenseSample>,
}

impl Tabulation {
    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no point was tabulated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sample stored under `label`.
    pub fn get(&self, label: &str) -> Option<&DenseSample> {
        self.entries.get(label)
    }

    /// `(label, sample)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DenseSample)> + '_ {
        self.entries.iter().map(|(l, s)| (l.as_str(), s))
    }

    fn insert(&mut self, label: String, sample: DenseSample) {
        self.entries.insert(label, sample);
    }
}

fn delta_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SEC + i128::from(delta.subsec_nanos())
}

/// Inverse of [`delta_nanos`] for offsets inside an existing `TimeDelta` span.
fn nanos_delta(nanos: i128) -> TimeDelta {
    let secs = nanos.div_euclid(NANOS_PER_SEC) as i64;
    let subsec = nanos.rem_euclid(NANOS_PER_SEC) as i64;
    TimeDelta::seconds(secs) + TimeDelta::nanoseconds(subsec)
}

/// The instants a tabulation of `[from, to)` with `count` points visits.
///
/// Exactly `count` instants, all before `to`; empty when `count == 0` or
/// `from >= to`.
pub fn tabulation_instants(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    count: usize,
) -> Vec<DateTime<Utc>> {
    if count == 0 || from >= to {
        return Vec::new();
    }

    let span = delta_nanos(to - from);
    let step = span / count as i128;

    // step * count <= span, so every offset stays inside [from, to).
    (0..count)
        .map(|i| from + nanos_delta(step * i as i128))
        .collect()
}

impl SampleStore {
    /// Interpolate `request.count` evenly spaced points over
    /// `[request.from, request.to)`.
    ///
    /// An empty range (`from == to`) yields an empty tabulation.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidRange`] when `from > to`,
    /// [`QueryError::InvalidCount`] when `count == 0`,
    /// [`QueryError::UnknownDevice`] for an unknown id, and otherwise the
    /// first interpolation failure in timestamp order. No partial result is
    /// returned.
    ///
    /// [`QueryError::InvalidRange`]: crate::query::QueryError::InvalidRange
    /// [`QueryError::InvalidCount`]: crate::query::QueryError::InvalidCount
    /// [`QueryError::UnknownDevice`]: crate::query::QueryError::UnknownDevice
    pub fn tabulate(&self, request: &TabulationRequest) -> QueryResult<Tabulation> {
        let TabulationRequest {
            id,
            from,
            to,
            count,
        } = request;

        ensure!(from <= to, InvalidRangeSnafu { from: *from, to: *to });
        ensure!(*count >= 1, InvalidCountSnafu { count: *count });
        ensure!(self.has_device(id), UnknownDeviceSnafu { device: id.as_str() });

        let instants = tabulation_instants(*from, *to, *count);
        let first_failure = AtomicUsize::new(usize::MAX);
        let results: Vec<Option<(usize, QueryResult<DenseSample>)>> = instants
            .par_iter()
            .enumerate()
            .map(|(i, &at)| {
                if i > first_failure.load(Ordering::Relaxed) {
                    return None;
                }
                let result = self.interpolate(id, at);
                if result.is_err() {
                    first_failure.fetch_min(i, Ordering::Relaxed);
                }
                Some((i, result))
            })
            .collect();

        // A skipped point always follows a recorded failure, so `?` returns
        // before any gap is reached.
        let mut tabulation = Tabulation::default();
        for (i, result) in results.into_iter().flatten() {
            tabulation.insert(format_label(instants[i]), result?);
        }

        debug!(
            "tabulated {} points ({} labels) for device {} over [{}, {})",
            instants.len(),
            tabulation.len(),
            id,
            from,
            to
        );
        Ok(tabulation)
    }
}
