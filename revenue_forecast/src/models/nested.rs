//! Nested total-revenue model
//!
//! A single through-origin regression explains total revenue from both
//! segments' customer counts jointly, the competing specification to the
//! individual segment models.

use revenue_math::regression;
use revenue_math::rounding::round_half_away;
use serde::Serialize;

use crate::data::QuarterlyFrame;
use crate::error::{Result, RevenueError};
use crate::models::{RevenuePredictor, CAD_PER_MILLION};

/// The fitted nested model.
#[derive(Debug, Clone, Serialize)]
pub struct NestedRevenueFit {
    wireline_per_customer: f64,
    wireless_per_customer: f64,
    r_squared: f64,
}

impl NestedRevenueFit {
    /// Fit total revenue on both customer-count columns over the window.
    ///
    /// A rank-deficient design (collinear customer counts) fails with the
    /// underlying singular-matrix error rather than producing NaNs.
    pub fn fit(window: &QuarterlyFrame) -> Result<Self> {
        let total = window.total_revenues()?;
        let wireline = window.wireline_customers()?;
        let wireless = window.wireless_customers()?;

        let fit = regression::fit_through_origin_multi(&total, &[&wireline, &wireless])
            .map_err(|e| RevenueError::FitError(format!("total revenue model: {}", e)))?;

        Ok(Self {
            wireline_per_customer: fit.coefficients()[0] * CAD_PER_MILLION,
            wireless_per_customer: fit.coefficients()[1] * CAD_PER_MILLION,
            r_squared: fit.r_squared(),
        })
    }

    /// Marginal wireline revenue per customer, CAD per quarter.
    pub fn wireline_per_customer(&self) -> f64 {
        self.wireline_per_customer
    }

    /// Marginal wireless revenue per customer, CAD per quarter.
    pub fn wireless_per_customer(&self) -> f64 {
        self.wireless_per_customer
    }

    /// Wireline minus wireless revenue per customer.
    pub fn per_customer_spread(&self) -> f64 {
        self.wireline_per_customer - self.wireless_per_customer
    }

    /// Uncentered R-squared of the fit.
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Wireline share of a predicted quarter, CAD millions, rounded.
    pub fn predict_wireline(&self, wireline_customers: f64) -> f64 {
        round_half_away(self.wireline_per_customer * wireline_customers / CAD_PER_MILLION)
    }

    /// Wireless share of a predicted quarter, CAD millions, rounded.
    pub fn predict_wireless(&self, wireless_customers: f64) -> f64 {
        round_half_away(self.wireless_per_customer * wireless_customers / CAD_PER_MILLION)
    }

    /// Unrounded total-revenue prediction in CAD millions.
    ///
    /// The one-year-ahead series applies its own two-decimal rounding, so
    /// this skips the integer-million report rounding.
    pub fn predict_total_raw(&self, wireline_customers: f64, wireless_customers: f64) -> f64 {
        (self.wireline_per_customer * wireline_customers
            + self.wireless_per_customer * wireless_customers)
            / CAD_PER_MILLION
    }
}

impl RevenuePredictor for NestedRevenueFit {
    fn predict_total(&self, wireline_customers: f64, wireless_customers: f64) -> f64 {
        round_half_away(self.predict_total_raw(wireline_customers, wireless_customers))
    }

    fn name(&self) -> &str {
        "total revenue model"
    }
}
