//! Plain-text report writer for ranked term importances.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use terrace_gam::RankedTerm;

use crate::IoError;

/// Writes a term-importance report, one `<term tuple>: <weight>` line per
/// term, in the order given (callers pass the descending-weight ranking).
pub struct ImportanceWriter {
    path: PathBuf,
}

impl ImportanceWriter {
    /// Create a new writer targeting the given output path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(path = %self.path.display(), n_terms = ranked.len()))]
    pub fn write(&self, ranked: &[RankedTerm]) -> Result<(), IoError> {
        let mut out = String::new();
        for entry in ranked {
            let _ = writeln!(out, "{}: {}", entry.term, entry.weight);
        }

        std::fs::write(&self.path, &out).map_err(|e| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        })?;

        info!(n_terms = ranked.len(), "importance report written");
        Ok(())
    }
}
