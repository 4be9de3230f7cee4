//! In-memory sample store.
//!
//! A [`SampleStore`] maps device ids to a [`DeviceSeries`], which in turn maps
//! millisecond timestamps to the [`SparseSample`] ingested at that instant.
//!
//! The store is built exactly once, by [`SampleStore::populate`], and is
//! read-only afterwards. All query methods take `&self`, so a populated store
//! can be shared across threads (behind an `Arc` or a plain reference) with no
//! locking.
//!
//! Invariants maintained by every constructor:
//!
//! - each sample's embedded timestamp equals its key in the series;
//! - a device id present in the store has at least one sample.
//!
//! Duplicate readings for the same device, timestamp and channel are not
//! rejected: the reading applied last wins.

pub mod error;
pub(crate) mod ingest;

use std::collections::{BTreeMap, btree_map};
use std::path::Path;

use log::{debug, info};
use snafu::prelude::*;

use crate::channel::Channel;
use crate::sample::SparseSample;

pub use error::{IngestError, IngestResult};
use error::ReadDirSnafu;

/// Samples ingested for one device, ordered by timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSeries {
    samples: BTreeMap<i64, SparseSample>,
}

impl DeviceSeries {
    /// Number of distinct timestamps.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples. Never true for a series owned by
    /// a [`SampleStore`].
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample recorded at exactly `timestamp_ms`.
    pub fn get(&self, timestamp_ms: i64) -> Option<&SparseSample> {
        self.samples.get(&timestamp_ms)
    }

    /// Earliest timestamp in the series.
    pub fn first_timestamp_ms(&self) -> Option<i64> {
        self.samples.keys().next().copied()
    }

    /// Latest timestamp in the series.
    pub fn last_timestamp_ms(&self) -> Option<i64> {
        self.samples.keys().next_back().copied()
    }

    /// Timestamps in ascending order.
    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.keys().copied()
    }

    /// Samples in ascending timestamp order.
    pub fn iter(&self) -> btree_map::Values<'_, i64, SparseSample> {
        self.samples.values()
    }

    /// Whether any sample carries a concrete reading for `channel`.
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.samples.values().any(|s| s.has(channel))
    }

    fn record(&mut self, timestamp_ms: i64, channel: Channel, value: f64) {
        self.samples
            .entry(timestamp_ms)
            .or_insert_with(|| SparseSample::new(timestamp_ms))
            .set(channel, value);
    }
}

/// Immutable dataset of per-device sparse samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    devices: BTreeMap<String, DeviceSeries>,
}

impl SampleStore {
    /// Build a store by walking the sample tree rooted at `root`.
    ///
    /// The tree holds one directory per device and one `<channel>.csv` file
    /// per channel (see [`Channel::file_name`]). The first unreadable file,
    /// malformed row or unrecognized file name aborts the whole pass.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] describing the first failure encountered.
    pub async fn populate(root: impl AsRef<Path>) -> IngestResult<SampleStore> {
        let root = root.as_ref();
        let root = tokio::fs::canonicalize(root).await.context(ReadDirSnafu {
            path: root.display().to_string(),
        })?;

        let mut store = SampleStore::default();
        for path in ingest::list_data_files(&root).await? {
            let file = ingest::classify(&path)?;
            let rows = ingest::read_rows(&file.path).await?;
            debug!(
                "ingested {} rows of {} for device {} from {}",
                rows.len(),
                file.channel,
                file.device_id,
                file.path.display()
            );

            if rows.is_empty() {
                continue;
            }
            let series = store.devices.entry(file.device_id).or_default();
            for (timestamp_ms, value) in rows {
                series.record(timestamp_ms, file.channel, value);
            }
        }

        info!(
            "populated {} samples across {} devices from {}",
            store.sample_count(),
            store.device_count(),
            root.display()
        );
        Ok(store)
    }

    /// Build a store directly from `(device, timestamp_ms, channel, value)`
    /// readings, applying them in iteration order.
    pub fn from_readings<I, S>(readings: I) -> SampleStore
    where
        I: IntoIterator<Item = (S, i64, Channel, f64)>,
        S: Into<String>,
    {
        let mut store = SampleStore::default();
        for (device, timestamp_ms, channel, value) in readings {
            store
                .devices
                .entry(device.into())
                .or_default()
                .record(timestamp_ms, channel, value);
        }
        store
    }

    /// Whether any sample was ingested for `device_id`.
    pub fn has_device(&self, device_id: &str) -> bool {
        self.devices.contains_key(device_id)
    }

    /// The series for `device_id`, if present.
    pub fn device(&self, device_id: &str) -> Option<&DeviceSeries> {
        self.devices.get(device_id)
    }

    /// Device ids in sorted order.
    pub fn device_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.devices.keys().map(String::as_str)
    }

    /// Number of devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Total number of samples across all devices.
    pub fn sample_count(&self) -> usize {
        self.devices.values().map(DeviceSeries::len).sum()
    }
}
