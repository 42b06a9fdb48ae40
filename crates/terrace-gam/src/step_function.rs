//! Piecewise-constant univariate functions over a single attribute.
//!
//! A [`StepFunction`] is defined by a sorted split array whose last element
//! is always `+Infinity`. For example, splits `[3, 5, +Inf]` define three
//! segments: `(-Inf, 3]`, `(3, 5]`, `(5, +Inf)`. The prediction array holds
//! the constant value returned for each segment, and a separate constant is
//! returned for missing (NaN) input.

use crate::error::GamError;

/// A segmented 1D function tied to one input attribute.
///
/// Invariants, enforced at construction:
/// - `splits` is strictly increasing with at least one element,
/// - the last split is `f64::INFINITY`,
/// - `splits` and `predictions` have equal length.
///
/// Scalar arithmetic and merge-addition mutate in place and return
/// `&mut Self` for chaining. A deep copy is a `clone()`; both arrays are
/// owned, so a clone never aliases its source.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFunction {
    attribute: usize,
    splits: Vec<f64>,
    predictions: Vec<f64>,
    prediction_on_missing: f64,
}

impl StepFunction {
    /// Create a validated step function.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`GamError::EmptySplits`] | `splits` is empty |
    /// | [`GamError::LengthMismatch`] | `splits` and `predictions` differ in length |
    /// | [`GamError::NonIncreasingSplits`] | a split is not greater than its predecessor |
    /// | [`GamError::MissingTerminalSplit`] | the last split is not `+Infinity` |
    pub fn new(
        attribute: usize,
        splits: Vec<f64>,
        predictions: Vec<f64>,
        prediction_on_missing: f64,
    ) -> Result<Self, GamError> {
        if splits.is_empty() {
            return Err(GamError::EmptySplits);
        }
        if splits.len() != predictions.len() {
            return Err(GamError::LengthMismatch {
                splits: splits.len(),
                predictions: predictions.len(),
            });
        }
        // The negated comparison also rejects NaN splits.
        for (index, pair) in splits.windows(2).enumerate() {
            if !(pair[0] < pair[1]) {
                return Err(GamError::NonIncreasingSplits { index: index + 1 });
            }
        }
        let last = splits[splits.len() - 1];
        if last != f64::INFINITY {
            return Err(GamError::MissingTerminalSplit { last });
        }
        Ok(Self {
            attribute,
            splits,
            predictions,
            prediction_on_missing,
        })
    }

    /// Create a constant function: one infinite segment returning
    /// `prediction` everywhere, including on missing input.
    #[must_use]
    pub fn constant(attribute: usize, prediction: f64) -> Self {
        Self {
            attribute,
            splits: vec![f64::INFINITY],
            predictions: vec![prediction],
            prediction_on_missing: prediction,
        }
    }

    /// Reset this function to the zero function over the same attribute.
    pub fn set_zero(&mut self) {
        self.splits = vec![f64::INFINITY];
        self.predictions = vec![0.0];
        self.prediction_on_missing = 0.0;
    }

    /// Evaluate the function at `x`.
    ///
    /// NaN routes to the missing-value prediction. Otherwise the segment is
    /// found by binary search for the smallest index `i` with
    /// `x <= splits[i]`; the terminal `+Infinity` guarantees one exists.
    /// O(log n).
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return self.prediction_on_missing;
        }
        let i = self.splits.partition_point(|&s| s < x);
        self.predictions[i]
    }

    /// Multiply every prediction (and the missing-value prediction) by `c`.
    pub fn scale_by(&mut self, c: f64) -> &mut Self {
        for p in &mut self.predictions {
            *p *= c;
        }
        self.prediction_on_missing *= c;
        self
    }

    /// Divide every prediction (and the missing-value prediction) by `c`.
    ///
    /// Division by zero follows IEEE semantics and yields ±Infinity or NaN;
    /// it is not an error. Callers relying on finiteness must check.
    pub fn divide_by(&mut self, c: f64) -> &mut Self {
        for p in &mut self.predictions {
            *p /= c;
        }
        self.prediction_on_missing /= c;
        self
    }

    /// Add `c` to every prediction (and the missing-value prediction).
    pub fn offset_by(&mut self, c: f64) -> &mut Self {
        for p in &mut self.predictions {
            *p += c;
        }
        self.prediction_on_missing += c;
        self
    }

    /// Add another function defined on the same attribute, in place.
    ///
    /// The result equals `self(x) + other(x)` for every `x`, defined over
    /// the union of both breakpoint sets. Splits of `other` are matched
    /// against `self` by exact bit-level value (`total_cmp`); two
    /// breakpoints that are mathematically equal but differ in the last bit
    /// stay distinct, producing an extra segment with the same prediction on
    /// both sides. When new breakpoints appear, every prediction is
    /// recomputed against the pre-merge arrays before they are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`GamError::IncompatibleTerm`] when the attribute indices
    /// differ.
    pub fn merge_add(&mut self, other: &StepFunction) -> Result<&mut Self, GamError> {
        if self.attribute != other.attribute {
            return Err(GamError::IncompatibleTerm {
                expected: self.attribute,
                got: other.attribute,
            });
        }

        // The terminal +Infinity is present on both sides, so only interior
        // splits of `other` can be new.
        let new_splits: Vec<f64> = other.splits[..other.splits.len() - 1]
            .iter()
            .copied()
            .filter(|s| self.splits.binary_search_by(|p| p.total_cmp(s)).is_err())
            .collect();

        if new_splits.is_empty() {
            // Breakpoint set unchanged: update each prediction in place.
            for i in 0..self.splits.len() {
                self.predictions[i] += other.evaluate(self.splits[i]);
            }
        } else {
            let mut merged = Vec::with_capacity(self.splits.len() + new_splits.len());
            merged.extend_from_slice(&self.splits);
            merged.extend_from_slice(&new_splits);
            merged.sort_by(f64::total_cmp);

            // Both evaluations must see pre-merge state; collect fully
            // before swapping the arrays in.
            let summed: Vec<f64> = merged
                .iter()
                .map(|&s| self.evaluate(s) + other.evaluate(s))
                .collect();

            self.splits = merged;
            self.predictions = summed;
        }

        self.prediction_on_missing += other.prediction_on_missing;
        Ok(self)
    }

    /// Return true if every prediction and the missing-value prediction are
    /// exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.predictions.iter().all(|&p| p == 0.0) && self.prediction_on_missing == 0.0
    }

    /// Return true if the function returns the same value everywhere,
    /// including on missing input. Exact comparison.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        let c = self.predictions[0];
        self.predictions[1..].iter().all(|&p| p == c) && self.prediction_on_missing == c
    }

    /// Return the attribute index this function is defined over.
    #[must_use]
    pub fn attribute(&self) -> usize {
        self.attribute
    }

    /// Return the split boundaries (last element is `+Infinity`).
    #[must_use]
    pub fn splits(&self) -> &[f64] {
        &self.splits
    }

    /// Return the per-segment predictions.
    #[must_use]
    pub fn predictions(&self) -> &[f64] {
        &self.predictions
    }

    /// Return the prediction for missing (NaN) input.
    #[must_use]
    pub fn prediction_on_missing(&self) -> f64 {
        self.prediction_on_missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_segments() -> StepFunction {
        StepFunction::new(0, vec![3.0, 5.0, f64::INFINITY], vec![1.0, 2.0, 4.0], 9.0).unwrap()
    }

    #[test]
    fn evaluate_right_closed_segments() {
        let f = three_segments();
        assert_eq!(f.evaluate(2.0), 1.0);
        assert_eq!(f.evaluate(3.0), 1.0);
        assert_eq!(f.evaluate(3.0001), 2.0);
        assert_eq!(f.evaluate(5.0), 2.0);
        assert_eq!(f.evaluate(5.1), 4.0);
        assert_eq!(f.evaluate(f64::NEG_INFINITY), 1.0);
        assert_eq!(f.evaluate(f64::INFINITY), 4.0);
    }

    #[test]
    fn evaluate_missing_routes_to_mv_prediction() {
        let f = three_segments();
        assert_eq!(f.evaluate(f64::NAN), 9.0);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = StepFunction::new(0, vec![3.0, f64::INFINITY], vec![1.0], 0.0).unwrap_err();
        assert!(matches!(err, GamError::LengthMismatch { splits: 2, predictions: 1 }));
    }

    #[test]
    fn new_rejects_empty_splits() {
        let err = StepFunction::new(0, vec![], vec![], 0.0).unwrap_err();
        assert!(matches!(err, GamError::EmptySplits));
    }

    #[test]
    fn new_rejects_non_increasing_splits() {
        let err =
            StepFunction::new(0, vec![5.0, 3.0, f64::INFINITY], vec![1.0, 2.0, 3.0], 0.0)
                .unwrap_err();
        assert!(matches!(err, GamError::NonIncreasingSplits { index: 1 }));
    }

    #[test]
    fn new_rejects_nan_split() {
        let err =
            StepFunction::new(0, vec![3.0, f64::NAN, f64::INFINITY], vec![1.0, 2.0, 3.0], 0.0)
                .unwrap_err();
        assert!(matches!(err, GamError::NonIncreasingSplits { .. }));
    }

    #[test]
    fn new_rejects_missing_terminal_infinity() {
        let err = StepFunction::new(0, vec![3.0, 5.0], vec![1.0, 2.0], 0.0).unwrap_err();
        assert!(matches!(err, GamError::MissingTerminalSplit { .. }));
    }

    #[test]
    fn scale_then_divide_is_identity() {
        let f = three_segments();
        let mut g = f.clone();
        g.scale_by(3.5).divide_by(3.5);
        for (a, b) in f.predictions().iter().zip(g.predictions()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!((f.prediction_on_missing() - g.prediction_on_missing()).abs() < 1e-12);
    }

    #[test]
    fn offset_then_negate_is_identity() {
        let f = three_segments();
        let mut g = f.clone();
        g.offset_by(2.25).offset_by(-2.25);
        assert_eq!(f, g);
    }

    #[test]
    fn divide_by_zero_follows_float_semantics() {
        let mut f = three_segments();
        f.divide_by(0.0);
        assert_eq!(f.evaluate(2.0), f64::INFINITY);
    }

    #[test]
    fn merge_add_introduces_new_breakpoints() {
        let mut f = three_segments();
        let g = StepFunction::new(0, vec![4.0, f64::INFINITY], vec![10.0, 20.0], 1.0).unwrap();
        f.merge_add(&g).unwrap();

        assert_eq!(f.splits(), &[3.0, 4.0, 5.0, f64::INFINITY]);
        // Sum at representative points of every merged segment.
        assert_eq!(f.evaluate(2.0), 1.0 + 10.0);
        assert_eq!(f.evaluate(3.5), 2.0 + 10.0);
        assert_eq!(f.evaluate(4.0), 2.0 + 10.0);
        assert_eq!(f.evaluate(4.5), 2.0 + 20.0);
        assert_eq!(f.evaluate(6.0), 4.0 + 20.0);
        assert_eq!(f.prediction_on_missing(), 10.0);
    }

    #[test]
    fn merge_add_pointwise_sum_everywhere() {
        let f = StepFunction::new(
            1,
            vec![-1.0, 2.0, f64::INFINITY],
            vec![0.5, -3.0, 7.0],
            2.0,
        )
        .unwrap();
        let g = StepFunction::new(
            1,
            vec![0.0, 2.0, 8.0, f64::INFINITY],
            vec![1.0, 2.0, 3.0, 4.0],
            -1.0,
        )
        .unwrap();
        let mut merged = f.clone();
        merged.merge_add(&g).unwrap();

        for &x in &[-5.0, -1.0, -0.5, 0.0, 1.0, 2.0, 3.0, 8.0, 100.0, f64::NAN] {
            let expected = f.evaluate(x) + g.evaluate(x);
            let got = merged.evaluate(x);
            assert!(
                (got - expected).abs() < 1e-12,
                "x = {x}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn merge_add_with_own_copy_doubles_in_place() {
        let f = three_segments();
        let mut doubled = f.clone();
        doubled.merge_add(&f.clone()).unwrap();

        // All breakpoints already present: the split set is unchanged.
        assert_eq!(doubled.splits(), f.splits());
        for (d, p) in doubled.predictions().iter().zip(f.predictions()) {
            assert_eq!(*d, 2.0 * p);
        }
        assert_eq!(doubled.prediction_on_missing(), 2.0 * f.prediction_on_missing());
    }

    #[test]
    fn merge_add_different_attributes_fails() {
        let mut f = StepFunction::constant(0, 1.0);
        let g = StepFunction::constant(1, 1.0);
        let err = f.merge_add(&g).unwrap_err();
        assert!(matches!(err, GamError::IncompatibleTerm { expected: 0, got: 1 }));
    }

    #[test]
    fn constant_predicates() {
        let zero = StepFunction::constant(4, 0.0);
        assert!(zero.is_zero());
        assert!(zero.is_constant());

        let five = StepFunction::constant(4, 5.0);
        assert!(!five.is_zero());
        assert!(five.is_constant());
        assert_eq!(five.evaluate(f64::NAN), 5.0);
    }

    #[test]
    fn step_function_is_not_constant() {
        assert!(!three_segments().is_constant());
        assert!(!three_segments().is_zero());
    }

    #[test]
    fn set_zero_resets() {
        let mut f = three_segments();
        f.set_zero();
        assert!(f.is_zero());
        assert_eq!(f.splits(), &[f64::INFINITY]);
        assert_eq!(f.attribute(), 0);
    }

    #[test]
    fn clone_does_not_alias() {
        let f = three_segments();
        let mut g = f.clone();
        g.scale_by(2.0);
        assert_eq!(f.evaluate(2.0), 1.0);
        assert_eq!(g.evaluate(2.0), 2.0);
    }
}
