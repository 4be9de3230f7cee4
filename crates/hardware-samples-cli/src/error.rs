use hardware_samples_core::{IngestError, QueryError};

use snafu::Snafu;

/// Result alias for CLI commands.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the user by `hwsamples`; each prints as one line.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    /// The sample tree could not be ingested.
    #[snafu(display(
        "Failed to load hardware samples from {root}: {source}. \
         Check --samples or HWSAMPLES_DIR."
    ))]
    Populate {
        root: String,
        #[snafu(source(from(IngestError, Box::new)))]
        source: Box<IngestError>,
    },

    /// Interpolation or tabulation failed.
    #[snafu(display("{source}"))]
    Query { source: QueryError },

    /// The `--request` file could not be read.
    #[snafu(display("Unable to read tabulation request {path}: {source}"))]
    ReadRequest {
        path: String,
        source: std::io::Error,
    },

    /// The `--request` file is not a valid tabulation request.
    #[snafu(display(
        "Invalid tabulation request {path}: {source}. \
         Expected {{\"id\", \"from\", \"to\", \"count\"}} with RFC 3339 instants."
    ))]
    ParseRequest {
        path: String,
        source: serde_json::Error,
    },

    /// A time argument is neither RFC 3339 nor epoch milliseconds.
    #[snafu(display(
        "Invalid timestamp '{raw}': expected RFC 3339 (e.g. 2022-11-05T13:04:05Z) \
         or integer milliseconds since the Unix epoch"
    ))]
    InvalidTimestamp { raw: String },

    /// An inline tabulation argument was omitted.
    #[snafu(display("Missing --{flag} (required unless --request is given)"))]
    MissingArg { flag: &'static str },

    /// Output could not be rendered as JSON.
    #[snafu(display("Failed to serialize output: {source}"))]
    Serialize { source: serde_json::Error },
}
