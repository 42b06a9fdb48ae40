//! Additive model container: index-aligned terms and regressors.

use crate::error::GamError;
use crate::step_function::StepFunction;
use crate::term::Term;

/// Read access to one data instance's attribute values.
///
/// The missing-value sentinel is NaN. Implemented for `[f64]` rows, where an
/// out-of-range attribute index also reads as missing.
pub trait Instance {
    /// Return the value of the given attribute, or NaN if missing.
    fn value_at(&self, attribute: usize) -> f64;
}

impl Instance for [f64] {
    fn value_at(&self, attribute: usize) -> f64 {
        self.get(attribute).copied().unwrap_or(f64::NAN)
    }
}

impl Instance for Vec<f64> {
    fn value_at(&self, attribute: usize) -> f64 {
        self.as_slice().value_at(attribute)
    }
}

/// A fitted additive model: an intercept plus a list of (term, regressor)
/// pairs.
///
/// `terms()[i]` names the attributes the i-th regressor belongs to; the two
/// lists are always index-aligned. The same term may appear several times
/// (one regressor per boosting round); consumers group by structural term
/// equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdditiveModel {
    intercept: f64,
    terms: Vec<Term>,
    regressors: Vec<StepFunction>,
}

impl AdditiveModel {
    /// Create an empty model with the given intercept.
    #[must_use]
    pub fn new(intercept: f64) -> Self {
        Self {
            intercept,
            terms: Vec::new(),
            regressors: Vec::new(),
        }
    }

    /// Create a model from pre-built component lists.
    ///
    /// # Errors
    ///
    /// Returns [`GamError::TermCountMismatch`] when the lists differ in
    /// length.
    pub fn with_components(
        intercept: f64,
        terms: Vec<Term>,
        regressors: Vec<StepFunction>,
    ) -> Result<Self, GamError> {
        if terms.len() != regressors.len() {
            return Err(GamError::TermCountMismatch {
                terms: terms.len(),
                regressors: regressors.len(),
            });
        }
        Ok(Self {
            intercept,
            terms,
            regressors,
        })
    }

    /// Append a (term, regressor) pair.
    pub fn push(&mut self, term: Term, regressor: StepFunction) {
        self.terms.push(term);
        self.regressors.push(regressor);
    }

    /// Return the model intercept.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Return the terms, index-aligned with [`Self::regressors`].
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Return the regressors, index-aligned with [`Self::terms`].
    #[must_use]
    pub fn regressors(&self) -> &[StepFunction] {
        &self.regressors
    }

    /// Return the number of (term, regressor) pairs.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.terms.len()
    }

    /// Predict the model output for one instance: the intercept plus every
    /// regressor evaluated at its attribute's value.
    #[must_use]
    pub fn predict<I: Instance + ?Sized>(&self, instance: &I) -> f64 {
        self.intercept
            + self
                .regressors
                .iter()
                .map(|r| r.evaluate(instance.value_at(r.attribute())))
                .sum::<f64>()
    }
}
