//! Customer-count trend models
//!
//! Each segment's customer count is regressed on the sequential quarter
//! index with an intercept, giving a straight-line path that can be read
//! off at future index values.

use revenue_math::regression::{self, LineFit};
use revenue_math::rounding::round_half_away;
use serde::Serialize;

use crate::data::QuarterlyFrame;
use crate::error::{Result, RevenueError};

/// A fitted linear time trend for one segment's customer counts.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerTrendFit {
    intercept: f64,
    slope: f64,
    r_squared: f64,
}

impl CustomerTrendFit {
    /// Fit counts against the 1-based trend index.
    pub fn fit(counts: &[f64], trend: &[f64]) -> Result<Self> {
        let line: LineFit = regression::fit_line(counts, trend)?;
        Ok(Self {
            intercept: line.intercept(),
            slope: line.slope(),
            r_squared: line.r_squared(),
        })
    }

    /// Fitted intercept (customers at index zero).
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Fitted slope (customers gained or lost per quarter).
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Centered R-squared of the fit.
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Predicted customer count at a trend index, rounded to whole customers.
    pub fn predict_count(&self, trend_index: f64) -> f64 {
        round_half_away(self.intercept + self.slope * trend_index)
    }
}

/// Both segments' trend models, fitted on the same chronological table.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerTrends {
    wireline: CustomerTrendFit,
    wireless: CustomerTrendFit,
}

impl CustomerTrends {
    /// Fit wireline and wireless trends on an oldest-first table.
    pub fn fit(chronological: &QuarterlyFrame) -> Result<Self> {
        if !chronological.is_chronological() {
            return Err(RevenueError::ValidationError(
                "trend models expect the oldest-first table".to_string(),
            ));
        }

        let trend = chronological.trend_indices();
        Ok(Self {
            wireline: CustomerTrendFit::fit(&chronological.wireline_customers()?, &trend)?,
            wireless: CustomerTrendFit::fit(&chronological.wireless_customers()?, &trend)?,
        })
    }

    /// The wireline trend model.
    pub fn wireline(&self) -> &CustomerTrendFit {
        &self.wireline
    }

    /// The wireless trend model.
    pub fn wireless(&self) -> &CustomerTrendFit {
        &self.wireless
    }
}
