//! Turning command-line arguments into core queries.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use hardware_samples_core::TabulationRequest;
use log::debug;
use snafu::{OptionExt, ResultExt};

use crate::error::{
    CliResult, InvalidTimestampSnafu, MissingArgSnafu, ParseRequestSnafu, ReadRequestSnafu,
};

/// Parse an instant given as RFC 3339 or as integer epoch milliseconds.
pub fn parse_instant(raw: &str) -> CliResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }

    raw.parse::<i64>()
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .context(InvalidTimestampSnafu { raw })
}

/// Read a JSON tabulation request from disk.
pub async fn load_request(path: &Path) -> CliResult<TabulationRequest> {
    let text = tokio::fs::read_to_string(path)
        .await
        .context(ReadRequestSnafu {
            path: path.display().to_string(),
        })?;

    let request: TabulationRequest = serde_json::from_str(&text).context(ParseRequestSnafu {
        path: path.display().to_string(),
    })?;
    debug!("loaded tabulation request from {}: {request:?}", path.display());
    Ok(request)
}

/// Inline tabulation arguments, as given on the command line.
#[derive(Debug, Default)]
pub struct InlineRequest {
    pub device: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub count: Option<usize>,
}

impl InlineRequest {
    pub fn into_request(self) -> CliResult<TabulationRequest> {
        let device = self.device.context(MissingArgSnafu { flag: "device" })?;
        let from = self.from.context(MissingArgSnafu { flag: "from" })?;
        let to = self.to.context(MissingArgSnafu { flag: "to" })?;
        let count = self.count.context(MissingArgSnafu { flag: "count" })?;

        Ok(TabulationRequest::new(
            device,
            parse_instant(&from)?,
            parse_instant(&to)?,
            count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn at_ms(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).single().expect("valid timestamp")
    }

    #[test]
    fn parses_rfc3339_and_epoch_millis() -> CliResult<()> {
        assert_eq!(parse_instant("1970-01-01T00:00:01.5Z")?, at_ms(1_500));
        assert_eq!(parse_instant("1970-01-01T01:00:02+01:00")?, at_ms(2_000));
        assert_eq!(parse_instant("2500")?, at_ms(2_500));
        assert_eq!(parse_instant(" -10 ")?, at_ms(-10));
        Ok(())
    }

    #[test]
    fn rejects_garbage_timestamps() {
        let err = parse_instant("yesterday").unwrap_err();
        assert!(matches!(err, CliError::InvalidTimestamp { ref raw } if raw == "yesterday"));
    }

    #[test]
    fn inline_request_requires_every_field() {
        let err = InlineRequest {
            device: Some("fan1".to_string()),
            from: Some("1000".to_string()),
            to: None,
            count: Some(3),
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(err, CliError::MissingArg { flag: "to" }));
    }

    #[test]
    fn inline_request_builds() -> CliResult<()> {
        let request = InlineRequest {
            device: Some("fan1".to_string()),
            from: Some("1000".to_string()),
            to: Some("1970-01-01T00:00:04Z".to_string()),
            count: Some(3),
        }
        .into_request()?;
        assert_eq!(request, TabulationRequest::new("fan1", at_ms(1_000), at_ms(4_000), 3));
        Ok(())
    }

    #[tokio::test]
    async fn loads_request_file() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::TempDir::new()?;
        let path = tmp.path().join("request.json");
        std::fs::write(
            &path,
            r#"{"id":"fan1","from":"1970-01-01T00:00:01Z","to":"1970-01-01T00:00:04Z","count":3}"#,
        )?;
        let request = load_request(&path).await?;
        assert_eq!(request, TabulationRequest::new("fan1", at_ms(1_000), at_ms(4_000), 3));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_request_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::TempDir::new()?;
        let path = tmp.path().join("request.json");
        std::fs::write(&path, r#"{"id":"fan1","count":3}"#)?;
        let err = load_request(&path).await.unwrap_err();
        assert!(matches!(err, CliError::ParseRequest { .. }));

        let err = load_request(&tmp.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, CliError::ReadRequest { .. }));
        Ok(())
    }
}
