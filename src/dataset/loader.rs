//! JSON dataset reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::dataset::record::Record;
use crate::errors::TransformResult;

/// Read a JSON array of records from any reader.
///
/// # Errors
/// Returns an error if the input is not a JSON array of records.
pub fn read_dataset<R: Read>(reader: R) -> TransformResult<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    debug!(records = records.len(), "dataset parsed");
    Ok(records)
}

/// Load a JSON array of records from a file.
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed.
pub fn load_dataset(path: impl AsRef<Path>) -> TransformResult<Vec<Record>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading dataset");
    let file = File::open(path)?;
    read_dataset(BufReader::new(file))
}
