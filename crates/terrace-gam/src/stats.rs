//! Dispersion statistics for importance weighting.
//!
//! Pure functions over slices. Every statistic of an empty slice is defined
//! as 0.0 so a diagnostic run over zero instances yields zero weights rather
//! than a 0/0 NaN.

/// Arithmetic mean. Returns 0.0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (mean squared deviation). Returns 0.0 for an empty slice.
#[must_use]
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Mean absolute deviation about the mean. Returns 0.0 for an empty slice.
#[must_use]
pub fn mean_abs_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&v| (v - m).abs()).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_literal() {
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn variance_of_literal() {
        // [1, 2, 3]: deviations [-1, 0, 1], population variance 2/3.
        assert!((variance(&[1.0, 2.0, 3.0]) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mad_of_literal() {
        // [1, 2, 3]: |deviations| [1, 0, 1], MAD 2/3.
        assert!((mean_abs_deviation(&[1.0, 2.0, 3.0]) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn constant_input_zero_dispersion() {
        let v = [7.5; 10];
        assert_eq!(variance(&v), 0.0);
        assert_eq!(mean_abs_deviation(&v), 0.0);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(mean_abs_deviation(&[]), 0.0);
    }
}
