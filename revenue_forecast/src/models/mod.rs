//! Revenue and customer-count models for the quarterly table

pub mod nested;
pub mod segment;
pub mod trend;

pub use nested::NestedRevenueFit;
pub use segment::SegmentRevenueFit;
pub use trend::{CustomerTrendFit, CustomerTrends};

/// CAD per CAD million; converts fitted slopes (revenue millions per
/// customer) to per-customer dollar figures and back.
pub const CAD_PER_MILLION: f64 = 1_000_000.0;

/// A fitted model that prices a quarter's total revenue from its segment
/// customer counts.
pub trait RevenuePredictor {
    /// Predicted total revenue in CAD millions, rounded to the nearest
    /// integer million.
    fn predict_total(&self, wireline_customers: f64, wireless_customers: f64) -> f64;

    /// Name of the model, as used in reports.
    fn name(&self) -> &str;
}
