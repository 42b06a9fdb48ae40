//! Line-oriented text format for persisted additive models.
//!
//! A model file is an `Intercept:`/`Terms:`/`Regressors:` envelope with
//! counts declared up front, followed by one block per step function:
//!
//! ```text
//! Intercept: 0.25
//! Terms: 2
//! [0]
//! [1]
//! Regressors: 2
//! AttIndex: 0
//! PredictionOnMV: 0
//! Splits: 3
//! [3, 5, +Infinity]
//! Predictions: 3
//! [1, 2, 4]
//! AttIndex: 1
//! ...
//! ```
//!
//! Infinities render as `+Infinity`/`-Infinity` and NaN as `NaN`; the parser
//! accepts those spellings alongside standard float syntax. Round-tripping
//! preserves breakpoint counts, values, and ordering exactly; numeric text
//! formatting may differ.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use terrace_gam::{AdditiveModel, StepFunction, Term};

use crate::IoError;

/// Reads an additive model from the line-oriented text format.
pub struct ModelReader {
    path: PathBuf,
}

impl ModelReader {
    /// Create a new reader for the given model file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the model file.
    ///
    /// Every parsed step function passes through the validating
    /// constructor, so a persisted function violating the sorted-breakpoint
    /// invariants is rejected here rather than at evaluation time.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
    /// | [`IoError::ModelParse`] | Line deviates from the format, or a declared count doesn't match |
    /// | [`IoError::MalformedModel`] | A parsed component violates a core invariant |
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<AdditiveModel, IoError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        let mut cursor = LineCursor::new(&self.path, &content);

        let intercept = cursor.expect_float("Intercept")?;

        let n_terms = cursor.expect_usize("Terms")?;
        let mut terms = Vec::with_capacity(n_terms);
        for _ in 0..n_terms {
            let (line, text) = cursor.next_line()?;
            terms.push(Term::new(parse_bracketed_usizes(cursor.path, line, text)?));
        }

        let n_regressors = cursor.expect_usize("Regressors")?;
        let regressors_line = cursor.current;
        let mut regressors = Vec::with_capacity(n_regressors);
        for _ in 0..n_regressors {
            regressors.push(read_step_function(&mut cursor)?);
        }

        let model = AdditiveModel::with_components(intercept, terms, regressors).map_err(|e| {
            IoError::MalformedModel {
                path: self.path.clone(),
                line: regressors_line,
                source: e,
            }
        })?;

        debug!(
            intercept = model.intercept(),
            n_components = model.n_components(),
            "model loaded"
        );
        Ok(model)
    }
}

/// Writes an additive model in the line-oriented text format.
pub struct ModelWriter {
    path: PathBuf,
}

impl ModelWriter {
    /// Create a new writer targeting the given path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Write the model.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn write(&self, model: &AdditiveModel) -> Result<(), IoError> {
        let mut out = String::new();
        let _ = writeln!(out, "Intercept: {}", fmt_float(model.intercept()));
        let _ = writeln!(out, "Terms: {}", model.terms().len());
        for term in model.terms() {
            let _ = writeln!(out, "{term}");
        }
        let _ = writeln!(out, "Regressors: {}", model.regressors().len());
        for regressor in model.regressors() {
            write_step_function(&mut out, regressor);
        }

        std::fs::write(&self.path, &out).map_err(|e| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        })?;

        info!(
            n_components = model.n_components(),
            size_bytes = out.len(),
            "model written"
        );
        Ok(())
    }
}

/// Append one step-function block.
fn write_step_function(out: &mut String, f: &StepFunction) {
    let _ = writeln!(out, "AttIndex: {}", f.attribute());
    let _ = writeln!(out, "PredictionOnMV: {}", fmt_float(f.prediction_on_missing()));
    let _ = writeln!(out, "Splits: {}", f.splits().len());
    let _ = writeln!(out, "{}", fmt_float_array(f.splits()));
    let _ = writeln!(out, "Predictions: {}", f.predictions().len());
    let _ = writeln!(out, "{}", fmt_float_array(f.predictions()));
}

/// Parse one step-function block.
fn read_step_function(cursor: &mut LineCursor<'_>) -> Result<StepFunction, IoError> {
    let attribute = cursor.expect_usize("AttIndex")?;
    let prediction_on_missing = cursor.expect_float("PredictionOnMV")?;

    let n_splits = cursor.expect_usize("Splits")?;
    let (splits_line, splits_text) = cursor.next_line()?;
    let splits = parse_bracketed_floats(cursor.path, splits_line, splits_text)?;
    if splits.len() != n_splits {
        return Err(IoError::ModelParse {
            path: cursor.path.to_path_buf(),
            line: splits_line,
            reason: format!("declared {n_splits} splits, found {}", splits.len()),
        });
    }

    let n_predictions = cursor.expect_usize("Predictions")?;
    let (predictions_line, predictions_text) = cursor.next_line()?;
    let predictions = parse_bracketed_floats(cursor.path, predictions_line, predictions_text)?;
    if predictions.len() != n_predictions {
        return Err(IoError::ModelParse {
            path: cursor.path.to_path_buf(),
            line: predictions_line,
            reason: format!(
                "declared {n_predictions} predictions, found {}",
                predictions.len()
            ),
        });
    }

    StepFunction::new(attribute, splits, predictions, prediction_on_missing).map_err(|e| {
        IoError::MalformedModel {
            path: cursor.path.to_path_buf(),
            line: splits_line,
            source: e,
        }
    })
}

/// Line iterator with 1-based numbering and format-error context.
struct LineCursor<'a> {
    path: &'a Path,
    lines: std::str::Lines<'a>,
    current: usize,
}

impl<'a> LineCursor<'a> {
    fn new(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            lines: content.lines(),
            current: 0,
        }
    }

    /// Return the next non-empty line with its 1-based number.
    fn next_line(&mut self) -> Result<(usize, &'a str), IoError> {
        for line in self.lines.by_ref() {
            self.current += 1;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok((self.current, trimmed));
            }
        }
        Err(self.parse_error(self.current + 1, "unexpected end of file".to_string()))
    }

    /// Read a `Tag: value` line, returning the value and its line number.
    fn expect_tagged(&mut self, tag: &str) -> Result<(&'a str, usize), IoError> {
        let (line, text) = self.next_line()?;
        match text.split_once(':') {
            Some((found, value)) if found.trim() == tag => Ok((value.trim(), line)),
            _ => Err(self.parse_error(line, format!("expected \"{tag}: ...\", got \"{text}\""))),
        }
    }

    /// Read a `Tag: <float>` line.
    fn expect_float(&mut self, tag: &str) -> Result<f64, IoError> {
        let (value, line) = self.expect_tagged(tag)?;
        // std float parsing already accepts the Infinity/NaN spellings.
        value
            .parse::<f64>()
            .map_err(|_| self.parse_error(line, format!("invalid float \"{value}\"")))
    }

    /// Read a `Tag: <non-negative integer>` line.
    fn expect_usize(&mut self, tag: &str) -> Result<usize, IoError> {
        let (value, line) = self.expect_tagged(tag)?;
        value
            .parse::<usize>()
            .map_err(|_| self.parse_error(line, format!("invalid integer \"{value}\"")))
    }

    fn parse_error(&self, line: usize, reason: String) -> IoError {
        IoError::ModelParse {
            path: self.path.to_path_buf(),
            line,
            reason,
        }
    }
}

/// Render a float with `+Infinity`/`-Infinity`/`NaN` spellings.
fn fmt_float(v: f64) -> String {
    if v == f64::INFINITY {
        "+Infinity".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v}")
    }
}

/// Render a float slice as a bracketed, comma-separated list.
fn fmt_float_array(values: &[f64]) -> String {
    let mut out = String::from("[");
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&fmt_float(*v));
    }
    out.push(']');
    out
}

/// Parse `[a, b, c]` into floats.
fn parse_bracketed_floats(path: &Path, line: usize, text: &str) -> Result<Vec<f64>, IoError> {
    let inner = strip_brackets(path, line, text)?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>().map_err(|_| IoError::ModelParse {
                path: path.to_path_buf(),
                line,
                reason: format!("invalid float \"{part}\""),
            })
        })
        .collect()
}

/// Parse `[a, b, c]` into attribute indices.
fn parse_bracketed_usizes(path: &Path, line: usize, text: &str) -> Result<Vec<usize>, IoError> {
    let inner = strip_brackets(path, line, text)?;
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<usize>().map_err(|_| IoError::ModelParse {
                path: path.to_path_buf(),
                line,
                reason: format!("invalid attribute index \"{part}\""),
            })
        })
        .collect()
}

fn strip_brackets<'a>(path: &Path, line: usize, text: &'a str) -> Result<&'a str, IoError> {
    text.strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .map(str::trim)
        .ok_or_else(|| IoError::ModelParse {
            path: path.to_path_buf(),
            line,
            reason: format!("expected bracketed list, got \"{text}\""),
        })
}
