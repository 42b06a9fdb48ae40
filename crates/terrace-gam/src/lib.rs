//! Step-function additive models and term-importance diagnostics.
//!
//! Provides a validated piecewise-constant univariate function with
//! logarithmic evaluation and linear merge-addition, an additive model
//! container of index-aligned (term, regressor) pairs, and a diagnostic
//! that ranks terms by the dispersion of their per-instance contributions.

mod diagnostics;
mod error;
mod model;
pub mod stats;
mod step_function;
mod term;

pub use diagnostics::{Mode, RankedTerm, TermImportance, diagnose, rank_terms};
pub use error::GamError;
pub use model::{AdditiveModel, Instance};
pub use step_function::StepFunction;
pub use term::Term;
