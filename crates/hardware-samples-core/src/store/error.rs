//! Error types and SNAFU context selectors for sample ingestion.
//!
//! Every variant is fatal to the ingestion pass: [`SampleStore::populate`]
//! never returns a partially built store.
//!
//! [`SampleStore::populate`]: crate::store::SampleStore::populate

use arrow::error::ArrowError;
use snafu::{Backtrace, prelude::*};

/// Errors raised while building a [`SampleStore`](crate::store::SampleStore)
/// from a directory of channel files.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum IngestError {
    /// A directory in the sample tree could not be listed.
    #[snafu(display("Unable to read sample directory {path}: {source}"))]
    ReadDir {
        /// Directory that failed to list.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
        /// Backtrace captured at the failure site.
        backtrace: Backtrace,
    },

    /// A channel file could not be opened or read.
    #[snafu(display("Unable to read hardware data file {path}: {source}"))]
    ReadFile {
        /// File that failed to read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
        /// Backtrace captured at the failure site.
        backtrace: Backtrace,
    },

    /// The file is not well-formed two-column CSV.
    #[snafu(display("Malformed CSV in hardware data file {path}: {source}"))]
    Csv {
        /// File that failed to tokenize.
        path: String,
        /// Underlying CSV decoder error.
        source: ArrowError,
    },

    /// A file name that does not belong to the channel set.
    #[snafu(display("Hardware schema does not support file {path}"))]
    UnknownChannelFile {
        /// Offending file.
        path: String,
    },

    /// The timestamp column is not a base-10 integer.
    #[snafu(display(
        "Cannot convert timestamp {raw:?} on row {row} of hardware data file {path}: {source}"
    ))]
    MalformedTimestamp {
        /// File containing the bad row.
        path: String,
        /// 1-based row number.
        row: usize,
        /// Raw field text (empty if the field was blank).
        raw: String,
        /// Integer parse failure.
        source: std::num::ParseIntError,
    },

    /// The value column is not a floating-point number.
    #[snafu(display(
        "Cannot convert value {raw:?} on row {row} of hardware data file {path}: {source}"
    ))]
    MalformedValue {
        /// File containing the bad row.
        path: String,
        /// 1-based row number.
        row: usize,
        /// Raw field text (empty if the field was blank).
        raw: String,
        /// Float parse failure.
        source: std::num::ParseFloatError,
    },

    /// The value parsed but is NaN or infinite.
    #[snafu(display(
        "Non-finite value {raw:?} on row {row} of hardware data file {path}"
    ))]
    NonFiniteValue {
        /// File containing the bad row.
        path: String,
        /// 1-based row number.
        row: usize,
        /// Raw field text.
        raw: String,
    },

    /// The CSV decoder produced a column that is not UTF-8 text.
    #[snafu(display("Column {column} of hardware data file {path} is not text"))]
    UnexpectedColumn {
        /// File being decoded.
        path: String,
        /// Zero-based column index.
        column: usize,
    },
}

/// Result alias for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;
