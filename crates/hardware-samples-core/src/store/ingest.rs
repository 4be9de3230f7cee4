//! Directory walk and CSV row decoding for channel files.
//!
//! Layout of a sample tree:
//!
//! ```text
//! <root>/
//!   fan1/
//!     temperature.csv
//!     peak_velocity_x.csv
//!   pump7/
//!     temperature.csv
//! ```
//!
//! Every non-directory entry anywhere under the root is a channel file. Its
//! parent directory's name is the device id and its base name selects the
//! channel. Rows are `timestamp_ms,value` with no header.
//!
//! Tokenizing goes through `arrow-csv` with both columns typed as text, so
//! that number parsing (and its error reporting) stays under our control.

use std::{
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};

use arrow::array::{Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow_csv::{ReaderBuilder, reader::Format};
use snafu::prelude::*;
use tokio::fs;

use crate::channel::Channel;
use crate::store::error::{
    CsvSnafu, IngestResult, MalformedTimestampSnafu, MalformedValueSnafu, NonFiniteValueSnafu,
    ReadDirSnafu, ReadFileSnafu, UnexpectedColumnSnafu, UnknownChannelFileSnafu,
};

/// A data file resolved to the device and channel it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChannelFile {
    pub(crate) path: PathBuf,
    pub(crate) device_id: String,
    pub(crate) channel: Channel,
}

/// Recursively list every non-directory entry under `root`, sorted by path.
pub(crate) async fn list_data_files(root: &Path) -> IngestResult<Vec<PathBuf>> {
    let mut pending = vec![root.to_path_buf()];
    let mut files = Vec::new();

    while let Some(dir) = pending.pop() {
        let dir_str = || dir.display().to_string();
        let mut entries = fs::read_dir(&dir)
            .await
            .context(ReadDirSnafu { path: dir_str() })?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .context(ReadDirSnafu { path: dir_str() })?
        {
            let path = entry.path();
            let file_type = entry.file_type().await.context(ReadDirSnafu {
                path: path.display().to_string(),
            })?;
            if file_type.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Map a data file path to its device id and channel.
pub(crate) fn classify(path: &Path) -> IngestResult<ChannelFile> {
    let channel = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(Channel::from_file_name)
        .context(UnknownChannelFileSnafu {
            path: path.display().to_string(),
        })?;

    let parent = path.parent().unwrap_or(Path::new(""));
    let device_id = match parent.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => parent.display().to_string(),
    };

    Ok(ChannelFile {
        path: path.to_path_buf(),
        device_id,
        channel,
    })
}

/// Read a channel file in full and decode its rows.
pub(crate) async fn read_rows(path: &Path) -> IngestResult<Vec<(i64, f64)>> {
    let bytes = fs::read(path).await.context(ReadFileSnafu {
        path: path.display().to_string(),
    })?;
    decode_rows(path, &bytes)
}

fn row_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("timestamp_ms", DataType::Utf8, true),
        Field::new("value", DataType::Utf8, true),
    ]))
}

fn text_column<'a>(batch: &'a RecordBatch, column: usize, path: &Path) -> IngestResult<&'a StringArray> {
    batch
        .column(column)
        .as_any()
        .downcast_ref::<StringArray>()
        .context(UnexpectedColumnSnafu {
            path: path.display().to_string(),
            column,
        })
}

fn field(array: &StringArray, i: usize) -> &str {
    // The CSV decoder reports blank fields as nulls.
    if array.is_null(i) { "" } else { array.value(i) }
}

/// Decode `timestamp_ms,value` rows from raw CSV bytes.
///
/// `path` is only used for error context.
pub(crate) fn decode_rows(path: &Path, bytes: &[u8]) -> IngestResult<Vec<(i64, f64)>> {
    let path_str = || path.display().to_string();

    let reader = ReaderBuilder::new(row_schema())
        .with_format(Format::default().with_header(false))
        .build(Cursor::new(bytes))
        .context(CsvSnafu { path: path_str() })?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.context(CsvSnafu { path: path_str() })?;
        let timestamps = text_column(&batch, 0, path)?;
        let values = text_column(&batch, 1, path)?;

        for i in 0..batch.num_rows() {
            let row = rows.len() + 1;

            let raw_ts = field(timestamps, i);
            let timestamp_ms = raw_ts.parse::<i64>().context(MalformedTimestampSnafu {
                path: path_str(),
                row,
                raw: raw_ts,
            })?;

            let raw_value = field(values, i);
            let value = raw_value.parse::<f64>().context(MalformedValueSnafu {
                path: path_str(),
                row,
                raw: raw_value,
            })?;
            ensure!(
                value.is_finite(),
                NonFiniteValueSnafu {
                    path: path_str(),
                    row,
                    raw: raw_value,
                }
            );

            rows.push((timestamp_ms, value));
        }
    }

    Ok(rows)
}
