//! Forecast accuracy metrics.
//!
//! All functions return NaN when the slices differ in length or are empty.

use statrs::statistics::Statistics;

/// Mean Absolute Error.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Mean Squared Error.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Root Mean Squared Error. Same scale as the data.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Coefficient of determination.
///
/// Undefined (NaN) for fewer than two samples or a constant `actual`.
/// Otherwise at most 1.0, and negative when the fit is worse than the mean.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.len() < 2 {
        return f64::NAN;
    }

    let mean = actual.iter().mean();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return f64::NAN;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        let actual = [3.0, -0.5, 2.0, 7.0];
        let predicted = [2.5, 0.0, 2.0, 8.0];

        assert!((mae(&actual, &predicted) - 0.5).abs() < 1e-12);
        assert!((mse(&actual, &predicted) - 0.375).abs() < 1e-12);
        assert!((rmse(&actual, &predicted) - 0.375f64.sqrt()).abs() < 1e-12);
        assert!((r2_score(&actual, &predicted) - 0.948_608_137_044_967_9).abs() < 1e-12);
    }

    #[test]
    fn perfect_fit() {
        let values = [1.0, 2.0, 4.0];
        assert_eq!(mae(&values, &values), 0.0);
        assert_eq!(rmse(&values, &values), 0.0);
        assert_eq!(r2_score(&values, &values), 1.0);
    }

    #[test]
    fn undefined_inputs() {
        assert!(mae(&[], &[]).is_nan());
        assert!(rmse(&[1.0], &[1.0, 2.0]).is_nan());
        assert!(r2_score(&[1.0], &[1.0]).is_nan());
        assert!(r2_score(&[2.0, 2.0], &[1.0, 3.0]).is_nan());
    }
}
