//! Domain types for terrace-io.

/// A dataset of instance rows for diagnostics.
///
/// Produced by [`DatasetReader`](crate::DatasetReader). Attribute names come
/// from the CSV header; `instances()[i][a]` is the value of attribute `a`
/// for instance `i`, with NaN marking a missing value.
#[derive(Debug)]
pub struct Dataset {
    /// Attribute column names from the CSV header.
    attribute_names: Vec<String>,
    /// Instance values: `instances[row][attribute]`, NaN when missing.
    instances: Vec<Vec<f64>>,
}

impl Dataset {
    /// Create a new dataset.
    pub(crate) fn new(attribute_names: Vec<String>, instances: Vec<Vec<f64>>) -> Self {
        Self {
            attribute_names,
            instances,
        }
    }

    /// Return the attribute column names.
    #[must_use]
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    /// Return the instance rows (row-major).
    #[must_use]
    pub fn instances(&self) -> &[Vec<f64>] {
        &self.instances
    }

    /// Return the number of instances.
    #[must_use]
    pub fn n_instances(&self) -> usize {
        self.instances.len()
    }

    /// Return the number of attribute columns.
    #[must_use]
    pub fn n_attributes(&self) -> usize {
        self.attribute_names.len()
    }
}
