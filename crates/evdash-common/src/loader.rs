//! Loads the vehicle population table from delimited text.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::{EvDashError, Result};
use crate::types::VehicleRecord;

/// Immutable snapshot of the loaded table, shared read-only for a session.
pub type VehicleTable = Arc<[VehicleRecord]>;

/// Reads the CSV export into typed records.
#[derive(Debug, Clone)]
pub struct TableLoader {
    path: PathBuf,
    delimiter: u8,
}

impl TableLoader {
    /// Creates a loader for a comma separated file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Uses a different field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the whole file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<VehicleTable> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            EvDashError::Table {
                message: format!("cannot read {}", self.path.display()),
                row: None,
                source: Some(Box::new(e)),
            }
        })?;
        debug!(bytes = bytes.len(), "read table file");

        let records = parse_table_with_delimiter(bytes.as_slice(), self.delimiter)?;
        info!(records = records.len(), "loaded vehicle table");
        Ok(records.into())
    }
}

/// Parses comma separated records from any reader.
pub fn parse_table<R: Read>(reader: R) -> Result<Vec<VehicleRecord>> {
    parse_table_with_delimiter(reader, b',')
}

/// Parses records with an explicit delimiter.
///
/// Rows are numbered from 1, not counting the header, in error messages.
pub fn parse_table_with_delimiter<R: Read>(reader: R, delimiter: u8) -> Result<Vec<VehicleRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize::<VehicleRecord>().enumerate() {
        let row = index as u64 + 1;
        let record = result.map_err(|e| {
            EvDashError::table_at_row(format!("cannot decode record: {e}"), row, e)
        })?;
        records.push(record);
    }

    Ok(records)
}
