//! Sparse and dense multi-channel samples.
//!
//! Ingestion only ever produces [`SparseSample`]s: each source file supplies
//! a single channel, so a sample at a given timestamp usually has most of its
//! slots empty. Interpolation only ever produces [`DenseSample`]s, which carry
//! a value for every channel. Keeping the two apart means a caller holding a
//! `DenseSample` never has to check for missing readings.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::channel::Channel;

/// One device's ingested readings at a single millisecond timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseSample {
    timestamp_ms: i64,
    readings: [Option<f64>; Channel::COUNT],
}

impl SparseSample {
    /// Create a sample at `timestamp_ms` with every channel absent.
    pub fn new(timestamp_ms: i64) -> Self {
        Self {
            timestamp_ms,
            readings: [None; Channel::COUNT],
        }
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// The concrete reading for `channel`, if one was ingested.
    pub fn get(&self, channel: Channel) -> Option<f64> {
        self.readings[channel.index()]
    }

    /// Whether `channel` has a concrete reading.
    pub fn has(&self, channel: Channel) -> bool {
        self.readings[channel.index()].is_some()
    }

    /// Record a reading, replacing any earlier one for the same channel.
    pub fn set(&mut self, channel: Channel, value: f64) {
        self.readings[channel.index()] = Some(value);
    }

    /// Number of channels with a concrete reading.
    pub fn populated(&self) -> usize {
        self.readings.iter().filter(|r| r.is_some()).count()
    }

    /// Iterate `(channel, reading)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, Option<f64>)> + '_ {
        Channel::ALL.into_iter().zip(self.readings.iter().copied())
    }
}

/// A fully populated sample synthesized for an arbitrary instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseSample {
    time: DateTime<Utc>,
    values: [f64; Channel::COUNT],
}

impl DenseSample {
    pub(crate) fn new(time: DateTime<Utc>, values: [f64; Channel::COUNT]) -> Self {
        Self { time, values }
    }

    /// The instant this sample was synthesized for.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Value of `channel` at [`DenseSample::time`].
    pub fn get(&self, channel: Channel) -> f64 {
        self.values[channel.index()]
    }

    /// Iterate `(channel, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        Channel::ALL.into_iter().zip(self.values.iter().copied())
    }
}

/// Serialized as an object keyed by [`Channel::json_key`]; the timestamp is
/// carried by whatever label the sample is stored under.
impl Serialize for DenseSample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Channel::COUNT))?;
        for (channel, value) in self.iter() {
            map.serialize_entry(channel.json_key(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sparse_sample_starts_empty_and_overwrites() {
        let mut sample = SparseSample::new(1_000);
        assert_eq!(sample.populated(), 0);
        assert_eq!(sample.get(Channel::Temperature), None);

        sample.set(Channel::Temperature, 20.5);
        sample.set(Channel::Temperature, 21.0);
        sample.set(Channel::RmsVelocityY, 0.3);

        assert_eq!(sample.get(Channel::Temperature), Some(21.0));
        assert!(sample.has(Channel::RmsVelocityY));
        assert!(!sample.has(Channel::PeakVelocityX));
        assert_eq!(sample.populated(), 2);
        assert_eq!(sample.timestamp_ms(), 1_000);
    }

    #[test]
    fn dense_sample_serializes_channel_keys_in_slot_order() -> Result<(), serde_json::Error> {
        let time = Utc.timestamp_millis_opt(0).single().expect("valid epoch");
        let mut values = [0.0; Channel::COUNT];
        values[Channel::Temperature.index()] = 42.5;
        values[Channel::RmsAccelerationY.index()] = 1.25;
        let sample = DenseSample::new(time, values);

        let encoded = serde_json::to_string(&sample)?;
        assert!(encoded.starts_with("{\"temperature\":42.5,\"peakVelocityX\":0.0"));
        assert!(encoded.ends_with("\"rmsAccelerationY\":1.25}"));
        assert!(!encoded.contains("time"));
        Ok(())
    }
}
