//! Out-of-sample accuracy scoring for the revenue models

use chrono::NaiveDate;

use crate::data::QuarterlyFrame;
use crate::error::{Result, RevenueError};
use crate::models::RevenuePredictor;

/// Element-wise squared residuals (predicted - actual)^2.
pub fn squared_residuals(predicted: &[f64], actual: &[f64]) -> Result<Vec<f64>> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(RevenueError::ValidationError(
            "predicted and actual values must have the same non-zero length".to_string(),
        ));
    }

    Ok(predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .collect())
}

/// Sum of squared residuals over a window.
pub fn sum_squared_residuals(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    Ok(squared_residuals(predicted, actual)?.iter().sum())
}

/// One holdout quarter's predictions and squared residuals.
#[derive(Debug, Clone)]
pub struct HoldoutRow {
    /// Quarter-end date
    pub date: NaiveDate,
    /// Reported total revenue, CAD millions
    pub actual: f64,
    /// Individual-segment-model prediction, rounded CAD millions
    pub segment_predicted: f64,
    /// Total-revenue-model prediction, rounded CAD millions
    pub nested_predicted: f64,
    /// Squared residual of the individual-segment prediction
    pub segment_squared_residual: f64,
    /// Squared residual of the total-revenue prediction
    pub nested_squared_residual: f64,
}

/// Holdout accuracy comparison between the two revenue models.
#[derive(Debug, Clone)]
pub struct HoldoutComparison {
    rows: Vec<HoldoutRow>,
    segment_ssr: f64,
    nested_ssr: f64,
}

impl HoldoutComparison {
    /// Per-quarter detail rows.
    pub fn rows(&self) -> &[HoldoutRow] {
        &self.rows
    }

    /// Sum of squared residuals for the individual segment models.
    pub fn segment_ssr(&self) -> f64 {
        self.segment_ssr
    }

    /// Sum of squared residuals for the total revenue model.
    pub fn nested_ssr(&self) -> f64 {
        self.nested_ssr
    }

    /// Individual-segment SSR divided by total-revenue SSR.
    ///
    /// A ratio above one means the individual segment models miss by that
    /// multiple more, in squared-error terms. Infinite when the total
    /// revenue model fits the holdout exactly.
    pub fn error_ratio(&self) -> f64 {
        self.segment_ssr / self.nested_ssr
    }
}

impl std::fmt::Display for HoldoutComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Out-of-sample total revenue predictions ({} quarters):",
            self.rows.len()
        )?;
        writeln!(
            f,
            "  {:<12} {:>8} {:>12} {:>10} {:>12} {:>10}",
            "quarter", "actual", "individual", "sq. resid", "total", "sq. resid"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "  {:<12} {:>8.0} {:>12.0} {:>10.2} {:>12.0} {:>10.2}",
                row.date.format("%Y-%m-%d"),
                row.actual,
                row.segment_predicted,
                row.segment_squared_residual,
                row.nested_predicted,
                row.nested_squared_residual,
            )?;
        }
        writeln!(f, "  SSR individual segment models: {:.2}", self.segment_ssr)?;
        writeln!(f, "  SSR total revenue model:       {:.2}", self.nested_ssr)?;
        writeln!(
            f,
            "  error ratio (individual / total): {:.2}",
            self.error_ratio()
        )?;
        Ok(())
    }
}

/// Score both models' rounded predictions against the holdout quarters.
pub fn compare_on_holdout<A, B>(
    holdout: &QuarterlyFrame,
    segment_model: &A,
    nested_model: &B,
) -> Result<HoldoutComparison>
where
    A: RevenuePredictor,
    B: RevenuePredictor,
{
    let actual = holdout.total_revenues()?;
    let wireline = holdout.wireline_customers()?;
    let wireless = holdout.wireless_customers()?;
    let dates = holdout.dates();

    let segment_predicted: Vec<f64> = wireline
        .iter()
        .zip(wireless.iter())
        .map(|(w, l)| segment_model.predict_total(*w, *l))
        .collect();
    let nested_predicted: Vec<f64> = wireline
        .iter()
        .zip(wireless.iter())
        .map(|(w, l)| nested_model.predict_total(*w, *l))
        .collect();

    let segment_sq = squared_residuals(&segment_predicted, &actual)?;
    let nested_sq = squared_residuals(&nested_predicted, &actual)?;

    let rows: Vec<HoldoutRow> = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| HoldoutRow {
            date,
            actual: actual[i],
            segment_predicted: segment_predicted[i],
            nested_predicted: nested_predicted[i],
            segment_squared_residual: segment_sq[i],
            nested_squared_residual: nested_sq[i],
        })
        .collect();

    Ok(HoldoutComparison {
        segment_ssr: segment_sq.iter().sum(),
        nested_ssr: nested_sq.iter().sum(),
        rows,
    })
}
