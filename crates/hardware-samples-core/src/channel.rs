//! The closed set of measurement channels.
//!
//! Every device reports the same fixed set of channels. Each channel is
//! ingested from its own CSV file, so the channel set doubles as the schema
//! of a device directory:
//!
//! | Channel                          | File                       | JSON key            |
//! |----------------------------------|----------------------------|---------------------|
//! | [`Channel::Temperature`]         | `temperature.csv`          | `temperature`       |
//! | [`Channel::PeakVelocityX`]       | `peak_velocity_x.csv`      | `peakVelocityX`     |
//! | [`Channel::RmsVelocityX`]        | `rms_velocity_x.csv`       | `rmsVelocityX`      |
//! | [`Channel::PeakAccelerationX`]   | `peak_acceleration_x.csv`  | `peakAccelerationX` |
//! | [`Channel::RmsAccelerationX`]    | `rms_acceleration_x.csv`   | `rmsAccelerationX`  |
//! | [`Channel::PeakVelocityY`]       | `peak_velocity_y.csv`      | `peakVelocityY`     |
//! | [`Channel::RmsVelocityY`]        | `rms_velocity_y.csv`       | `rmsVelocityY`      |
//! | [`Channel::PeakAccelerationY`]   | `peak_acceleration_y.csv`  | `peakAccelerationY` |
//! | [`Channel::RmsAccelerationY`]    | `rms_acceleration_y.csv`   | `rmsAccelerationY`  |
//!
//! The order of [`Channel::ALL`] is the slot order inside samples and the
//! column order of rendered output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One measurement kind reported by a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    /// Housing temperature.
    Temperature,
    /// Peak velocity along the X axis.
    PeakVelocityX,
    /// RMS velocity along the X axis.
    RmsVelocityX,
    /// Peak acceleration along the X axis.
    PeakAccelerationX,
    /// RMS acceleration along the X axis.
    RmsAccelerationX,
    /// Peak velocity along the Y axis.
    PeakVelocityY,
    /// RMS velocity along the Y axis.
    RmsVelocityY,
    /// Peak acceleration along the Y axis.
    PeakAccelerationY,
    /// RMS acceleration along the Y axis.
    RmsAccelerationY,
}

impl Channel {
    /// Number of channels in the closed set.
    pub const COUNT: usize = 9;

    /// All channels, in slot order.
    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::Temperature,
        Channel::PeakVelocityX,
        Channel::RmsVelocityX,
        Channel::PeakAccelerationX,
        Channel::RmsAccelerationX,
        Channel::PeakVelocityY,
        Channel::RmsVelocityY,
        Channel::PeakAccelerationY,
        Channel::RmsAccelerationY,
    ];

    /// Slot index of this channel inside a sample.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name of the CSV file that carries this channel's readings.
    pub const fn file_name(self) -> &'static str {
        match self {
            Channel::Temperature => "temperature.csv",
            Channel::PeakVelocityX => "peak_velocity_x.csv",
            Channel::RmsVelocityX => "rms_velocity_x.csv",
            Channel::PeakAccelerationX => "peak_acceleration_x.csv",
            Channel::RmsAccelerationX => "rms_acceleration_x.csv",
            Channel::PeakVelocityY => "peak_velocity_y.csv",
            Channel::RmsVelocityY => "rms_velocity_y.csv",
            Channel::PeakAccelerationY => "peak_acceleration_y.csv",
            Channel::RmsAccelerationY => "rms_acceleration_y.csv",
        }
    }

    /// Key used for this channel in serialized samples.
    pub const fn json_key(self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::PeakVelocityX => "peakVelocityX",
            Channel::RmsVelocityX => "rmsVelocityX",
            Channel::PeakAccelerationX => "peakAccelerationX",
            Channel::RmsAccelerationX => "rmsAccelerationX",
            Channel::PeakVelocityY => "peakVelocityY",
            Channel::RmsVelocityY => "rmsVelocityY",
            Channel::PeakAccelerationY => "peakAccelerationY",
            Channel::RmsAccelerationY => "rmsAccelerationY",
        }
    }

    /// Resolve a data file's base name to its channel.
    ///
    /// Matching is exact and case-sensitive; `None` means the file does not
    /// belong to the channel set.
    pub fn from_file_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.file_name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}
