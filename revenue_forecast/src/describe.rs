//! Descriptive summaries of the quarterly table

use statrs::statistics::Statistics;

use crate::data::QuarterlyFrame;
use crate::error::{Result, RevenueError};
use crate::models::CAD_PER_MILLION;

/// Summary statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct SeriesSummary {
    /// Column name as it appears in the input file
    pub name: &'static str,
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Smallest observation
    pub min: f64,
    /// Largest observation
    pub max: f64,
}

/// Column summaries for the historical table.
#[derive(Debug, Clone)]
pub struct FrameSummary {
    series: Vec<SeriesSummary>,
}

impl FrameSummary {
    /// Per-column summaries, in input-file column order.
    pub fn series(&self) -> &[SeriesSummary] {
        &self.series
    }
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "  {:<16} {:>14} {:>14} {:>14} {:>14}",
            "column", "mean", "std dev", "min", "max"
        )?;
        for s in &self.series {
            writeln!(
                f,
                "  {:<16} {:>14.1} {:>14.1} {:>14.1} {:>14.1}",
                s.name, s.mean, s.std_dev, s.min, s.max
            )?;
        }
        Ok(())
    }
}

/// Summarize every numeric column of the table.
pub fn summarize(frame: &QuarterlyFrame) -> Result<FrameSummary> {
    let columns: Vec<(&'static str, Vec<f64>)> = vec![
        ("wline_rev", frame.wireline_revenues()?),
        ("wless_rev", frame.wireless_revenues()?),
        ("tot_rev_mils", frame.total_revenues()?),
        ("wline_cust_tot", frame.wireline_customers()?),
        ("wless_cust_tot", frame.wireless_customers()?),
    ];

    let series = columns
        .into_iter()
        .map(|(name, values)| SeriesSummary {
            name,
            mean: (&values).mean(),
            std_dev: (&values).std_dev(),
            min: (&values).min(),
            max: (&values).max(),
        })
        .collect();

    Ok(FrameSummary { series })
}

/// Average revenue-per-customer estimates, CAD per quarter.
///
/// The third estimator alongside the two regressions: average each
/// quarter's revenue over its own customer count.
#[derive(Debug, Clone)]
pub struct AverageRevenueEstimate {
    wireline_per_customer: f64,
    wireless_per_customer: f64,
}

impl AverageRevenueEstimate {
    /// Mean wireline revenue per customer.
    pub fn wireline_per_customer(&self) -> f64 {
        self.wireline_per_customer
    }

    /// Mean wireless revenue per customer.
    pub fn wireless_per_customer(&self) -> f64 {
        self.wireless_per_customer
    }

    /// Wireline minus wireless revenue per customer.
    pub fn per_customer_spread(&self) -> f64 {
        self.wireline_per_customer - self.wireless_per_customer
    }
}

/// Compute the averaging estimate over a window.
pub fn average_revenue_per_customer(window: &QuarterlyFrame) -> Result<AverageRevenueEstimate> {
    let wireline = per_customer_ratios(&window.wireline_revenues()?, &window.wireline_customers()?)?;
    let wireless = per_customer_ratios(&window.wireless_revenues()?, &window.wireless_customers()?)?;

    Ok(AverageRevenueEstimate {
        wireline_per_customer: (&wireline).mean(),
        wireless_per_customer: (&wireless).mean(),
    })
}

fn per_customer_ratios(revenue: &[f64], customers: &[f64]) -> Result<Vec<f64>> {
    revenue
        .iter()
        .zip(customers.iter())
        .map(|(r, c)| {
            if *c <= 0.0 {
                return Err(RevenueError::DataError(
                    "customer counts must be positive to average revenue per customer".to_string(),
                ));
            }
            Ok(r / c * CAD_PER_MILLION)
        })
        .collect()
}
