//! Term keys: ordered attribute-index tuples.

/// An ordered tuple of attribute indices identifying a model term.
///
/// A model may associate several regressors with the same term (one per
/// boosting round); grouping uses structural equality on the index tuple,
/// never reference identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(Vec<usize>);

impl Term {
    /// Create a term from an ordered list of attribute indices.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Create a main-effect term over a single attribute.
    #[must_use]
    pub fn single(attribute: usize) -> Self {
        Self(vec![attribute])
    }

    /// Return the attribute indices.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Term {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

impl std::fmt::Display for Term {
    /// Renders as a bracketed tuple, e.g. `[0, 3]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}
