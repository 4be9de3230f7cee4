//! Point interpolation over a device's sparse samples.
//!
//! [`SampleStore::interpolate`] reconstructs a [`DenseSample`] for an
//! arbitrary instant:
//!
//! 1. The device's timestamps `t[0..n]` are taken in ascending order.
//! 2. The *average interval* is `(t[n-1] - t[0]) / n`, i.e. the summed gaps
//!    divided by the sample count rather than the gap count, truncated to
//!    whole milliseconds. The resulting margin is slightly wider than the
//!    mean gap.
//! 3. The query must fall inside `[t[0] + avg, t[n-1] - avg]`; anything
//!    closer to the edges is rejected as
//!    [`QueryError::InsufficientDensity`]. Fewer than two samples never
//!    define a window.
//! 4. The anchor is the first index whose timestamp is `>=` the query.
//! 5. For each channel, the nearest concrete reading is searched backwards
//!    from the anchor (down to index 0) and forwards from the anchor (up to
//!    index `n-2`, or the anchor itself if that is later). The two readings
//!    are blended with a raised-cosine ease,
//!    `w = (1 - cos(pi * p)) / 2`, where `p` is the query's position between
//!    the two readings, clamped to `[0, 1]`. If both searches land on the
//!    same sample its reading is returned unchanged.
//!
//! When a search finds nothing on one side, the reading from the other side
//! is held. When neither side finds anything (the channel's only readings
//! sit in the last sample, past the forward search bound), the reading
//! nearest in time is used. A channel with no readings at all fails with
//! [`QueryError::ChannelUnavailable`].

use std::f64::consts::PI;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use snafu::prelude::*;

use crate::channel::Channel;
use crate::query::error::{
    ChannelUnavailableSnafu, InsufficientDensitySnafu, QueryResult, UnknownDeviceSnafu,
};
use crate::sample::{DenseSample, SparseSample};
use crate::store::SampleStore;

/// Average sampling interval in milliseconds: summed consecutive gaps over
/// the number of samples. Zero for fewer than two timestamps.
pub fn average_interval_ms(timestamps: &[i64]) -> i64 {
    if timestamps.len() < 2 {
        return 0;
    }
    let gaps: f64 = timestamps
        .windows(2)
        .map(|pair| pair[1] as f64 - pair[0] as f64)
        .sum();
    (gaps / timestamps.len() as f64) as i64
}

/// The inclusive window of interpolable query timestamps, or `None` when
/// the series is too short to define one.
///
/// `timestamps` must be sorted ascending.
pub fn density_window(timestamps: &[i64]) -> Option<RangeInclusive<i64>> {
    if timestamps.len() < 2 {
        return None;
    }
    let first = *timestamps.first()?;
    let last = *timestamps.last()?;
    let avg = average_interval_ms(timestamps);
    Some(first.saturating_add(avg)..=last.saturating_sub(avg))
}

/// Normalized position of `at` between `left` and `right`, clamped to
/// `[0, 1]`. A degenerate bracket maps to 0.
pub fn blend_position(at: i64, left: i64, right: i64) -> f64 {
    if right <= left {
        return 0.0;
    }
    ((at as f64 - left as f64) / (right as f64 - left as f64)).clamp(0.0, 1.0)
}

/// Raised-cosine ease: 0 at `p = 0`, 1 at `p = 1`, monotone in between.
pub fn ease_weight(p: f64) -> f64 {
    0.5 * (1.0 - (PI * p).cos())
}

/// Blend two concrete readings for a query at `at`.
pub fn blend(at: i64, left: (i64, f64), right: (i64, f64)) -> f64 {
    let (left_ts, left_value) = left;
    let (right_ts, right_value) = right;
    if left_ts == right_ts {
        return left_value;
    }

    let weight = ease_weight(blend_position(at, left_ts, right_ts));
    let value = left_value * (1.0 - weight) + right_value * weight;

    // Rounding can land one ulp outside the bracket.
    value.clamp(left_value.min(right_value), left_value.max(right_value))
}

fn reading(sample: &SparseSample, channel: Channel) -> Option<(i64, f64)> {
    sample.get(channel).map(|v| (sample.timestamp_ms(), v))
}

fn channel_value(
    samples: &[&SparseSample],
    anchor: usize,
    at: i64,
    channel: Channel,
) -> Option<f64> {
    let right_stop = anchor.max(samples.len().saturating_sub(2));

    let left = samples[..=anchor]
        .iter()
        .rev()
        .find_map(|s| reading(s, channel));
    let right = samples[anchor..=right_stop]
        .iter()
        .find_map(|s| reading(s, channel));

    match (left, right) {
        (Some(l), Some(r)) => Some(blend(at, l, r)),
        (Some((_, v)), None) | (None, Some((_, v))) => Some(v),
        (None, None) => samples
            .iter()
            .filter_map(|s| reading(s, channel))
            .min_by_key(|(ts, _)| ts.abs_diff(at))
            .map(|(_, v)| v),
    }
}

impl SampleStore {
    /// Synthesize a dense sample for `device_id` at `at`.
    ///
    /// The query is evaluated at millisecond resolution; the returned sample
    /// carries `at` unchanged.
    ///
    /// # Errors
    ///
    /// - [`QueryError::UnknownDevice`] if the device was never ingested.
    /// - [`QueryError::InsufficientDensity`] if `at` is outside the density
    ///   window (or the device has a single sample).
    /// - [`QueryError::ChannelUnavailable`] if some channel has no reading
    ///   anywhere in the device's series.
    ///
    /// [`QueryError::UnknownDevice`]: crate::query::QueryError::UnknownDevice
    /// [`QueryError::InsufficientDensity`]: crate::query::QueryError::InsufficientDensity
    /// [`QueryError::ChannelUnavailable`]: crate::query::QueryError::ChannelUnavailable
    pub fn interpolate(&self, device_id: &str, at: DateTime<Utc>) -> QueryResult<DenseSample> {
        let series = self
            .device(device_id)
            .context(UnknownDeviceSnafu { device: device_id })?;

        let samples: Vec<&SparseSample> = series.iter().collect();
        let timestamps: Vec<i64> = samples.iter().map(|s| s.timestamp_ms()).collect();
        let query_ms = at.timestamp_millis();

        let window = density_window(&timestamps);
        if !window.as_ref().is_some_and(|w| w.contains(&query_ms)) {
            let (earliest_ms, latest_ms) = match window {
                Some(w) => (*w.start(), *w.end()),
                None => {
                    let first = timestamps.first().copied().unwrap_or_default();
                    (first, first)
                }
            };
            return InsufficientDensitySnafu {
                device: device_id,
                at,
                samples: samples.len(),
                earliest_ms,
                latest_ms,
            }
            .fail();
        }

        let anchor = timestamps.partition_point(|&t| t < query_ms);

        let mut values = [0.0; Channel::COUNT];
        for channel in Channel::ALL {
            values[channel.index()] = channel_value(&samples, anchor, query_ms, channel)
                .context(ChannelUnavailableSnafu {
                    device: device_id,
                    channel,
                })?;
        }

        Ok(DenseSample::new(at, values))
    }
}
