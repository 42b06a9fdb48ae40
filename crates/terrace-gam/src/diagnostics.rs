//! Term-importance diagnostics for additive models.
//!
//! A term's importance is the dispersion of its summed per-instance
//! contribution across a dataset: a term whose contribution never varies
//! carries zero importance regardless of magnitude.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::str::FromStr;

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::error::GamError;
use crate::model::{AdditiveModel, Instance};
use crate::stats;
use crate::step_function::StepFunction;
use crate::term::Term;

/// Dispersion statistic used for term importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Population variance of the contribution vector (flag `L2`, default).
    #[default]
    Variance,
    /// Mean absolute deviation about the mean (flag `L1`).
    MeanAbsoluteDeviation,
}

impl FromStr for Mode {
    type Err = GamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L1" => Ok(Mode::MeanAbsoluteDeviation),
            "L2" => Ok(Mode::Variance),
            other => Err(GamError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Variance => f.write_str("L2"),
            Mode::MeanAbsoluteDeviation => f.write_str("L1"),
        }
    }
}

/// Importance weight for one distinct term.
#[derive(Debug, Clone, PartialEq)]
pub struct TermImportance {
    /// The term the weight belongs to.
    pub term: Term,
    /// Dispersion of the term's per-instance contribution.
    pub weight: f64,
}

/// A term with its importance weight and descending-weight rank.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTerm {
    /// The term.
    pub term: Term,
    /// Dispersion of the term's per-instance contribution.
    pub weight: f64,
    /// 1-based rank (1 = highest weight).
    pub rank: usize,
}

/// Compute an importance weight for every distinct term of a model.
///
/// Regressors are grouped by structural term equality, preserving both the
/// first-seen order of distinct terms and the per-term regressor order. For
/// each distinct term the per-instance contribution is the sum of all of
/// that term's regressors evaluated at the instance (a term appearing once
/// per boosting round accumulates every round); the weight is the `mode`
/// dispersion of that vector. An empty instance set yields weight 0.0 for
/// every term.
///
/// The per-term loop is parallelized: each term's contribution vector is
/// independent and write-disjoint. Inputs are never mutated.
#[instrument(skip_all, fields(
    n_components = model.n_components(),
    n_instances = instances.len(),
    mode = %mode,
))]
pub fn diagnose<I>(model: &AdditiveModel, instances: &[I], mode: Mode) -> Vec<TermImportance>
where
    I: Instance + Sync,
{
    // Group by term, keeping first-seen order for deterministic output.
    let mut groups: Vec<(&Term, Vec<&StepFunction>)> = Vec::new();
    let mut index_of: HashMap<&Term, usize> = HashMap::new();
    for (term, regressor) in model.terms().iter().zip(model.regressors()) {
        match index_of.entry(term) {
            Entry::Occupied(entry) => groups[*entry.get()].1.push(regressor),
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                groups.push((term, vec![regressor]));
            }
        }
    }

    let importances: Vec<TermImportance> = groups
        .par_iter()
        .map(|(term, regressors)| {
            let contribution: Vec<f64> = instances
                .iter()
                .map(|instance| {
                    regressors
                        .iter()
                        .map(|r| r.evaluate(instance.value_at(r.attribute())))
                        .sum()
                })
                .collect();
            let weight = match mode {
                Mode::Variance => stats::variance(&contribution),
                Mode::MeanAbsoluteDeviation => stats::mean_abs_deviation(&contribution),
            };
            TermImportance {
                term: (*term).clone(),
                weight,
            }
        })
        .collect();

    info!(n_terms = importances.len(), "term importances computed");
    importances
}

/// Sort importances by weight descending and assign 1-based ranks.
///
/// The sort is stable, so equal-weight terms keep their incoming order.
#[must_use]
pub fn rank_terms(mut importances: Vec<TermImportance>) -> Vec<RankedTerm> {
    importances.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    importances
        .into_iter()
        .enumerate()
        .map(|(i, imp)| RankedTerm {
            term: imp.term,
            weight: imp.weight,
            rank: i + 1,
        })
        .collect()
}
