#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Write `contents` to `<root>/<device>/<file>`, creating directories.
pub fn write_channel_file(root: &Path, device: &str, file: &str, contents: &str) -> TestResult<PathBuf> {
    let dir = root.join(device);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(file);
    std::fs::write(&path, contents)?;
    Ok(path)
}

pub const CHANNEL_FILES: [&str; 9] = [
    "temperature.csv",
    "peak_velocity_x.csv",
    "rms_velocity_x.csv",
    "peak_acceleration_x.csv",
    "rms_acceleration_x.csv",
    "peak_velocity_y.csv",
    "rms_velocity_y.csv",
    "peak_acceleration_y.csv",
    "rms_acceleration_y.csv",
];

/// A sample tree with device `fan1` sampled every second from 0 to 4000 ms on
/// all channels, value `i * 10` at the `i`-th second.
pub fn fan1_tree() -> TestResult<TempDir> {
    let tmp = TempDir::new()?;
    let rows: String = (0..=4).map(|i| format!("{},{}\n", i * 1_000, i * 10)).collect();
    for file in CHANNEL_FILES {
        write_channel_file(tmp.path(), "fan1", file, &rows)?;
    }
    Ok(tmp)
}
