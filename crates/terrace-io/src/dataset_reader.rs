//! CSV instance reader with full input validation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::Dataset;

/// Reads instance rows from a CSV file.
///
/// Expected CSV format:
/// - Header row required; every column is an attribute name
/// - One row per instance, all rows must have the same number of columns
/// - Empty cells and `?` mark missing values and parse as NaN
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::UnparseableValue`] | Non-missing cell is not a float |
/// | [`IoError::NoAttributeColumns`] | Header has zero columns |
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) allows rows with varying column counts so that our
        // own InconsistentRowLength check fires instead of a low-level
        // CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        let expected_cols = header.len();
        debug!(expected_cols, "read CSV header");

        if expected_cols == 0 {
            return Err(IoError::NoAttributeColumns {
                path: self.path.clone(),
            });
        }
        let attribute_names: Vec<String> = header.iter().map(String::from).collect();

        let mut instances = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let mut row = Vec::with_capacity(expected_cols);
            for (col_index, raw) in record.iter().enumerate() {
                let trimmed = raw.trim();
                // The missing-value sentinel: absent cell or "?".
                if trimmed.is_empty() || trimmed == "?" {
                    row.push(f64::NAN);
                    continue;
                }
                let value: f64 = trimmed.parse().map_err(|_| IoError::UnparseableValue {
                    path: self.path.clone(),
                    row_index,
                    col_index,
                    raw: raw.to_string(),
                })?;
                row.push(value);
            }
            instances.push(row);
        }

        if instances.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(
            n_instances = instances.len(),
            n_attributes = attribute_names.len(),
            "dataset loaded"
        );

        Ok(Dataset::new(attribute_names, instances))
    }
}
