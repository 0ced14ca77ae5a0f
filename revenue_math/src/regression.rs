//! Ordinary least squares fits for small quarterly samples
//!
//! Three fitting forms are provided:
//! - through-origin with a single predictor (per-segment revenue models)
//! - through-origin with several joint predictors (nested total-revenue model)
//! - simple regression with an intercept (customer-count trend models)
//!
//! The samples involved are tiny (12 to 16 observations, at most two
//! predictors), so the single-predictor fits use closed-form sums and the
//! joint fit solves the least-squares problem with an SVD, which stays
//! well-behaved for near-collinear customer-count columns.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::{MathError, Result};

/// Relative cutoff below which a singular value is treated as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// A fitted through-origin regression.
///
/// `coefficients` holds one slope per predictor column, in the order the
/// columns were supplied. `r_squared` is the uncentered coefficient of
/// determination, the conventional diagnostic for a no-intercept fit.
#[derive(Debug, Clone, Serialize)]
pub struct OriginFit {
    coefficients: Vec<f64>,
    r_squared: f64,
}

impl OriginFit {
    /// Fitted slope coefficients, one per predictor.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Uncentered R-squared of the fit.
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Predicted response for one observation's predictor values.
    pub fn predict(&self, predictors: &[f64]) -> Result<f64> {
        if predictors.len() != self.coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "expected {} predictor values, got {}",
                self.coefficients.len(),
                predictors.len()
            )));
        }

        Ok(self
            .coefficients
            .iter()
            .zip(predictors.iter())
            .map(|(b, x)| b * x)
            .sum())
    }
}

/// A fitted simple regression with an intercept.
#[derive(Debug, Clone, Serialize)]
pub struct LineFit {
    intercept: f64,
    slope: f64,
    r_squared: f64,
}

impl LineFit {
    /// Fitted intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Fitted slope.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Centered R-squared of the fit.
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Predicted response at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit `y = b * x` with no intercept.
///
/// The slope is the closed-form through-origin estimate sum(xy) / sum(x^2).
pub fn fit_through_origin(y: &[f64], x: &[f64]) -> Result<OriginFit> {
    validate_sample(y, &[x], 2)?;

    let sum_xx: f64 = x.iter().map(|v| v * v).sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();

    if !sum_xx.is_finite() || sum_xx <= 0.0 {
        return Err(MathError::SingularMatrix(
            "predictor column has no variation around the origin".to_string(),
        ));
    }

    let slope = sum_xy / sum_xx;
    let residual_ss: f64 = y
        .iter()
        .zip(x.iter())
        .map(|(yi, xi)| (yi - slope * xi).powi(2))
        .sum();
    let total_ss: f64 = y.iter().map(|v| v * v).sum();

    Ok(OriginFit {
        coefficients: vec![slope],
        r_squared: uncentered_r_squared(residual_ss, total_ss),
    })
}

/// Fit `y = b1 * x1 + b2 * x2 + ...` with no intercept.
///
/// `columns` holds one slice per predictor, all the same length as `y`.
/// Collinear columns surface as [`MathError::SingularMatrix`] rather than
/// silently producing a minimum-norm solution.
pub fn fit_through_origin_multi(y: &[f64], columns: &[&[f64]]) -> Result<OriginFit> {
    if columns.is_empty() {
        return Err(MathError::InvalidInput(
            "at least one predictor column is required".to_string(),
        ));
    }
    validate_sample(y, columns, columns.len() + 1)?;

    let rows = y.len();
    let design = DMatrix::from_fn(rows, columns.len(), |r, c| columns[c][r]);
    let target = DVector::from_column_slice(y);

    let svd = design.clone().svd(true, true);
    let max_singular = svd.singular_values.max();
    if !max_singular.is_finite() || max_singular <= 0.0 {
        return Err(MathError::SingularMatrix(
            "design matrix has no finite singular values".to_string(),
        ));
    }

    let cutoff = max_singular * RANK_TOLERANCE;
    if svd.rank(cutoff) < columns.len() {
        return Err(MathError::SingularMatrix(
            "predictor columns are collinear (rank-deficient design)".to_string(),
        ));
    }

    let beta = svd
        .solve(&target, cutoff)
        .map_err(|e| MathError::CalculationError(e.to_string()))?;
    if beta.iter().any(|b| !b.is_finite()) {
        return Err(MathError::SingularMatrix(
            "least-squares solution is not finite".to_string(),
        ));
    }

    let fitted = &design * &beta;
    let residual_ss: f64 = y
        .iter()
        .zip(fitted.iter())
        .map(|(yi, fi)| (yi - fi).powi(2))
        .sum();
    let total_ss: f64 = y.iter().map(|v| v * v).sum();

    Ok(OriginFit {
        coefficients: beta.iter().copied().collect(),
        r_squared: uncentered_r_squared(residual_ss, total_ss),
    })
}

/// Fit `y = a + b * x` by centered sums.
pub fn fit_line(y: &[f64], x: &[f64]) -> Result<LineFit> {
    validate_sample(y, &[x], 2)?;

    let n = y.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        numerator += (xi - x_mean) * (yi - y_mean);
        denominator += (xi - x_mean) * (xi - x_mean);
    }

    if denominator.abs() < f64::EPSILON {
        return Err(MathError::SingularMatrix(
            "predictor values are all identical".to_string(),
        ));
    }

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;

    let mut residual_ss = 0.0;
    let mut total_ss = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        residual_ss += (yi - (intercept + slope * xi)).powi(2);
        total_ss += (yi - y_mean).powi(2);
    }

    let r_squared = if total_ss > 0.0 {
        1.0 - residual_ss / total_ss
    } else {
        1.0
    };

    Ok(LineFit {
        intercept,
        slope,
        r_squared,
    })
}

fn uncentered_r_squared(residual_ss: f64, total_ss: f64) -> f64 {
    if total_ss > 0.0 {
        1.0 - residual_ss / total_ss
    } else {
        1.0
    }
}

fn validate_sample(y: &[f64], columns: &[&[f64]], min_len: usize) -> Result<()> {
    if y.len() < min_len {
        return Err(MathError::InsufficientData(format!(
            "need at least {} observations, got {}",
            min_len,
            y.len()
        )));
    }
    for column in columns {
        if column.len() != y.len() {
            return Err(MathError::InvalidInput(format!(
                "predictor length {} does not match response length {}",
                column.len(),
                y.len()
            )));
        }
    }
    if y.iter().any(|v| !v.is_finite())
        || columns.iter().any(|c| c.iter().any(|v| !v.is_finite()))
    {
        return Err(MathError::InvalidInput(
            "regression inputs must be finite".to_string(),
        ));
    }
    Ok(())
}
