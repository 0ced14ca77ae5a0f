//! Individual segment revenue models
//!
//! Each segment's revenue is regressed through the origin on its own
//! customer count, so the fitted coefficient, scaled to CAD, reads as the
//! segment's average revenue per customer.

use revenue_math::regression::{self, OriginFit};
use revenue_math::rounding::round_half_away;
use serde::Serialize;

use crate::data::QuarterlyFrame;
use crate::error::{Result, RevenueError};
use crate::models::{RevenuePredictor, CAD_PER_MILLION};

/// Both per-segment revenue models, fitted on the same window.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentRevenueFit {
    wireline_per_customer: f64,
    wireless_per_customer: f64,
    wireline_r_squared: f64,
    wireless_r_squared: f64,
}

impl SegmentRevenueFit {
    /// Fit the wireline and wireless models on the supplied window.
    pub fn fit(window: &QuarterlyFrame) -> Result<Self> {
        let wireline = fit_segment(
            "wireline",
            &window.wireline_revenues()?,
            &window.wireline_customers()?,
        )?;
        let wireless = fit_segment(
            "wireless",
            &window.wireless_revenues()?,
            &window.wireless_customers()?,
        )?;

        Ok(Self {
            wireline_per_customer: wireline.coefficients()[0] * CAD_PER_MILLION,
            wireless_per_customer: wireless.coefficients()[0] * CAD_PER_MILLION,
            wireline_r_squared: wireline.r_squared(),
            wireless_r_squared: wireless.r_squared(),
        })
    }

    /// Estimated wireline revenue per customer, CAD per quarter.
    pub fn wireline_per_customer(&self) -> f64 {
        self.wireline_per_customer
    }

    /// Estimated wireless revenue per customer, CAD per quarter.
    pub fn wireless_per_customer(&self) -> f64 {
        self.wireless_per_customer
    }

    /// Wireline minus wireless revenue per customer.
    pub fn per_customer_spread(&self) -> f64 {
        self.wireline_per_customer - self.wireless_per_customer
    }

    /// Uncentered R-squared of the wireline fit.
    pub fn wireline_r_squared(&self) -> f64 {
        self.wireline_r_squared
    }

    /// Uncentered R-squared of the wireless fit.
    pub fn wireless_r_squared(&self) -> f64 {
        self.wireless_r_squared
    }

    /// Predicted wireline revenue in CAD millions, rounded.
    pub fn predict_wireline(&self, wireline_customers: f64) -> f64 {
        round_half_away(self.wireline_per_customer * wireline_customers / CAD_PER_MILLION)
    }

    /// Predicted wireless revenue in CAD millions, rounded.
    pub fn predict_wireless(&self, wireless_customers: f64) -> f64 {
        round_half_away(self.wireless_per_customer * wireless_customers / CAD_PER_MILLION)
    }
}

impl RevenuePredictor for SegmentRevenueFit {
    fn predict_total(&self, wireline_customers: f64, wireless_customers: f64) -> f64 {
        let total_cad = self.wireline_per_customer * wireline_customers
            + self.wireless_per_customer * wireless_customers;
        round_half_away(total_cad / CAD_PER_MILLION)
    }

    fn name(&self) -> &str {
        "individual segment models"
    }
}

fn fit_segment(segment: &str, revenue: &[f64], customers: &[f64]) -> Result<OriginFit> {
    regression::fit_through_origin(revenue, customers)
        .map_err(|e| RevenueError::FitError(format!("{} segment model: {}", segment, e)))
}
