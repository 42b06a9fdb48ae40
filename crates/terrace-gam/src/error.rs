/// Errors from step-function construction, arithmetic, and diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum GamError {
    /// Returned when merge-addition is attempted across different attributes.
    #[error("cannot add functions on different attributes: {expected} vs {got}")]
    IncompatibleTerm {
        /// Attribute index of the function being mutated.
        expected: usize,
        /// Attribute index of the function being added.
        got: usize,
    },

    /// Returned when splits and predictions have different lengths.
    #[error("splits and predictions must have equal length, got {splits} and {predictions}")]
    LengthMismatch {
        /// Number of split boundaries provided.
        splits: usize,
        /// Number of segment predictions provided.
        predictions: usize,
    },

    /// Returned when a function is constructed with zero segments.
    #[error("a step function requires at least one segment")]
    EmptySplits,

    /// Returned when the split array is not strictly increasing.
    #[error("splits must be strictly increasing: violation at index {index}")]
    NonIncreasingSplits {
        /// Zero-based index of the first split that is not greater than its predecessor.
        index: usize,
    },

    /// Returned when the last split is not positive infinity.
    #[error("last split must be +Infinity, got {last}")]
    MissingTerminalSplit {
        /// The offending final split value.
        last: f64,
    },

    /// Returned when a model's term and regressor lists have different lengths.
    #[error("terms and regressors must be index-aligned, got {terms} terms and {regressors} regressors")]
    TermCountMismatch {
        /// Number of terms provided.
        terms: usize,
        /// Number of regressors provided.
        regressors: usize,
    },

    /// Returned when a diagnostic mode string is not recognized.
    #[error("unknown diagnostic mode \"{mode}\" (expected L1 or L2)")]
    UnknownMode {
        /// The unrecognized mode string.
        mode: String,
    },
}
