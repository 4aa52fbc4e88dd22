//! Loading tracking exports.
//!
//! The export is a CSV file with a header line and five columns in a fixed
//! order: entity, time (s), x (m), y (m), speed (m/s). Column names are
//! ignored.

use std::path::Path;

use tracing::{info, warn};
use tracking::Row;

use crate::error::{Error, Result};

const COLUMNS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    pub rows: Vec<Row>,
    /// Records that could not be read as a [`Row`]
    pub skipped: usize,
}

/// Reads tracking rows from CSV.
///
/// With `strict` the first unreadable record fails the whole read, otherwise
/// it is logged and skipped.
pub fn read_rows(reader: impl std::io::Read, strict: bool) -> Result<Input> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut input = Input::default();

    for (record, result) in reader.records().enumerate() {
        match result.map_err(Error::from).and_then(|this| parse(record, &this)) {
            Ok(row) => input.rows.push(row),
            Err(e) if strict => return Err(e),
            Err(e) => {
                warn!(record, error = %e, "skipping unreadable record");
                input.skipped += 1;
            }
        }
    }

    info!(rows = input.rows.len(), skipped = input.skipped, "read tracking rows");

    Ok(input)
}

pub fn read_rows_from_path(path: impl AsRef<Path>, strict: bool) -> Result<Input> {
    read_rows(std::fs::File::open(path)?, strict)
}

fn parse(record: usize, this: &csv::StringRecord) -> Result<Row> {
    if this.len() != COLUMNS {
        return Err(Error::ColumnCount {
            record,
            expected: COLUMNS,
            found: this.len(),
        });
    }

    Ok(this.deserialize(None)?)
}
