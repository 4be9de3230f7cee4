//! Integration tests for the `hwsamples` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const CHANNEL_FILES: [&str; 9] = [
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

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("hwsamples"))
}

/// `fan1` sampled every second from 0 to 4000 ms on all channels.
fn sample_tree() -> Result<TempDir, Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let dir = tmp.path().join("samples").join("fan1");
    std::fs::create_dir_all(&dir)?;
    let rows: String = (0..=4).map(|i| format!("{},{}\n", i * 1_000, i * 10)).collect();
    for file in CHANNEL_FILES {
        std::fs::write(dir.join(file), &rows)?;
    }
    Ok(tmp)
}

fn samples_arg(tmp: &TempDir) -> String {
    tmp.path().join("samples").to_string_lossy().into_owned()
}

#[test]
fn devices_lists_counts() -> TestResult {
    let tmp = sample_tree()?;

    cli()
        .args(["--samples", samples_arg(&tmp).as_str(), "devices"])
        .assert()
        .success()
        .stdout(contains("fan1").and(contains("1 devices, 5 samples")));

    Ok(())
}

#[test]
fn samples_dir_can_come_from_env() -> TestResult {
    let tmp = sample_tree()?;

    cli()
        .env("HWSAMPLES_DIR", samples_arg(&tmp))
        .arg("devices")
        .assert()
        .success()
        .stdout(contains("fan1"));

    Ok(())
}

#[test]
fn interpolate_prints_json_sample() -> TestResult {
    let tmp = sample_tree()?;

    cli()
        .args([
            "--samples",
            samples_arg(&tmp).as_str(),
            "interpolate",
            "--device",
            "fan1",
            "--at",
            "1970-01-01T00:00:02Z",
        ])
        .assert()
        .success()
        .stdout(contains("\"temperature\": 20.0").and(contains("\"rmsAccelerationY\": 20.0")));

    Ok(())
}

#[test]
fn interpolate_outside_window_fails() -> TestResult {
    let tmp = sample_tree()?;

    cli()
        .args([
            "--samples",
            samples_arg(&tmp).as_str(),
            "interpolate",
            "--device",
            "fan1",
            "--at",
            "700",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("No interpolable hardware samples"));

    Ok(())
}

#[test]
fn tabulate_inline_as_table() -> TestResult {
    let tmp = sample_tree()?;

    cli()
        .args([
            "--samples",
            samples_arg(&tmp).as_str(),
            "tabulate",
            "--device",
            "fan1",
            "--from",
            "1000",
            "--to",
            "4000",
            "--count",
            "3",
            "--format",
            "table",
        ])
        .assert()
        .success()
        .stdout(
            contains("January  1, 1970 12:00:01AM")
                .and(contains("January  1, 1970 12:00:03AM"))
                .and(contains("peakVelocityX")),
        );

    Ok(())
}

fn write_request(path: &Path, device: &str) -> std::io::Result<()> {
    std::fs::write(
        path,
        format!(
            r#"{{"id":"{device}","from":"1970-01-01T00:00:01Z","to":"1970-01-01T00:00:04Z","count":3}}"#
        ),
    )
}

#[test]
fn tabulate_from_request_file_as_json() -> TestResult {
    let tmp = sample_tree()?;
    let request = tmp.path().join("request.json");
    write_request(&request, "fan1")?;

    let output = cli()
        .args([
            "--samples",
            samples_arg(&tmp).as_str(),
            "tabulate",
            "--request",
            request.to_string_lossy().as_ref(),
        ])
        .output()?;
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let object = json.as_object().ok_or("expected a JSON object")?;
    assert_eq!(object.len(), 3);
    assert_eq!(
        object["January  1, 1970 12:00:02AM"]["temperature"],
        serde_json::json!(20.0)
    );

    Ok(())
}

#[test]
fn unknown_device_fails() -> TestResult {
    let tmp = sample_tree()?;
    let request = tmp.path().join("request.json");
    write_request(&request, "fan9")?;

    cli()
        .args([
            "--samples",
            samples_arg(&tmp).as_str(),
            "tabulate",
            "--request",
            request.to_string_lossy().as_ref(),
        ])
        .assert()
        .failure()
        .stderr(contains("No hardware data for \"fan9\""));

    cli()
        .args([
            "--samples",
            samples_arg(&tmp).as_str(),
            "interpolate",
            "--device",
            "fan9",
            "--at",
            "2000",
        ])
        .assert()
        .failure()
        .code(1);

    Ok(())
}

#[test]
fn missing_samples_dir_fails() -> TestResult {
    let tmp = TempDir::new()?;

    cli()
        .args([
            "--samples",
            tmp.path().join("absent").to_string_lossy().as_ref(),
            "devices",
        ])
        .assert()
        .failure()
        .stderr(contains("Failed to load hardware samples"));

    Ok(())
}

#[test]
fn request_conflicts_with_inline_args() -> TestResult {
    let tmp = sample_tree()?;

    cli()
        .args([
            "--samples",
            samples_arg(&tmp).as_str(),
            "tabulate",
            "--request",
            "request.json",
            "--device",
            "fan1",
        ])
        .assert()
        .failure();

    Ok(())
}
