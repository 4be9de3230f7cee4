//! Output rendering: pretty JSON and preview tables.

use chrono::{DateTime, TimeZone, Utc};
use hardware_samples_core::{Channel, SampleStore, Tabulation};
use serde::Serialize;
use snafu::ResultExt;
use tabled::{builder::Builder, settings::Style};

use crate::error::{CliResult, SerializeSnafu};

/// How a tabulation is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Label-keyed JSON object.
    Json,
    /// One row per label, one column per channel.
    Table,
}

/// Pretty-printed JSON for any serializable value.
pub fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).context(SerializeSnafu)
}

/// Render a tabulation in the requested format.
pub fn tabulation(tab: &Tabulation, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(tab),
        OutputFormat::Table => Ok(tabulation_table(tab)),
    }
}

fn tabulation_table(tab: &Tabulation) -> String {
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once("time".to_string()).chain(Channel::ALL.iter().map(|c| c.json_key().to_string())),
    );
    for (label, sample) in tab.iter() {
        builder.push_record(
            std::iter::once(label.to_string()).chain(sample.iter().map(|(_, v)| v.to_string())),
        );
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn rfc3339_ms(ms: Option<i64>) -> String {
    ms.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|t: DateTime<Utc>| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

/// Device listing: one row per device with its sample count and time
/// span, followed by the totals.
pub fn devices(store: &SampleStore) -> String {
    let mut builder = Builder::default();
    builder.push_record(["device", "samples", "first", "last"]);
    for id in store.device_ids() {
        let Some(series) = store.device(id) else {
            continue;
        };
        builder.push_record([
            id.to_string(),
            series.len().to_string(),
            rfc3339_ms(series.first_timestamp_ms()),
            rfc3339_ms(series.last_timestamp_ms()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    format!(
        "{table}\n{} devices, {} samples",
        store.device_count(),
        store.sample_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardware_samples_core::TabulationRequest;

    fn store() -> SampleStore {
        SampleStore::from_readings((0..=4).flat_map(|i| {
            Channel::ALL
                .into_iter()
                .map(move |c| ("fan1", i * 1_000, c, (i * 10) as f64))
        }))
    }

    fn tab() -> Tabulation {
        let at = |ms| Utc.timestamp_millis_opt(ms).single().expect("valid timestamp");
        store()
            .tabulate(&TabulationRequest::new("fan1", at(1_000), at(4_000), 3))
            .expect("tabulation succeeds")
    }

    #[test]
    fn table_has_header_and_one_row_per_label() {
        let out = tabulation(&tab(), OutputFormat::Table).expect("render");
        assert!(out.contains("time"));
        assert!(out.contains("peakAccelerationY"));
        assert!(out.contains("January  1, 1970 12:00:02AM"));
        // header + 3 rows, each framed by border lines
        assert_eq!(out.lines().filter(|l| l.contains("1970")).count(), 3);
    }

    #[test]
    fn json_is_label_keyed() {
        let out = tabulation(&tab(), OutputFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(
            value["January  1, 1970 12:00:01AM"]["rmsVelocityX"],
            serde_json::json!(10.0)
        );
    }

    #[test]
    fn device_listing_reports_totals() {
        let out = devices(&store());
        assert!(out.contains("fan1"));
        assert!(out.contains("1970-01-01T00:00:04+00:00"));
        assert!(out.ends_with("1 devices, 5 samples"));
    }
}
