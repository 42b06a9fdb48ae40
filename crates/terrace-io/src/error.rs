//! I/O error types for terrace-io.

use std::path::PathBuf;

use terrace_gam::GamError;

/// Errors from dataset reading, model parsing, and report writing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when an input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty dataset (no data rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a data row has a different number of columns than the header.
    #[error("inconsistent row length in {path}: row {row_index} has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a non-missing cell value cannot be parsed as a float.
    #[error("unparseable value in {path}: row {row_index}, column {col_index}, raw value \"{raw}\"")]
    UnparseableValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Zero-based column index.
        col_index: usize,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when the CSV header declares no attribute columns.
    #[error("no attribute columns in {path}")]
    NoAttributeColumns {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a model file deviates from the line-oriented format.
    #[error("model parse error in {path}, line {line}: {reason}")]
    ModelParse {
        /// Path to the model file.
        path: PathBuf,
        /// One-based line number where parsing failed.
        line: usize,
        /// Human-readable description of the deviation.
        reason: String,
    },

    /// Returned when a parsed model component violates a core invariant.
    #[error("malformed model in {path}, line {line}")]
    MalformedModel {
        /// Path to the model file.
        path: PathBuf,
        /// One-based line number of the offending component.
        line: usize,
        /// The violated invariant.
        source: GamError,
    },

    /// Returned when an output file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
