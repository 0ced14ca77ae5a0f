//! # Revenue Forecast
//!
//! Quarterly segment revenue analysis and one-year-ahead forecasting for a
//! two-segment (wireline / wireless) telecom operator.
//!
//! ## Features
//!
//! - Quarterly revenue and customer-count table loading (CSV)
//! - Competing revenue-per-customer models: individual segment fits vs. a
//!   nested total-revenue fit
//! - Out-of-sample accuracy comparison on a four-quarter holdout
//! - Linear customer-count trend forecasting
//! - One-year-ahead revenue outlook and PNG chart rendering
//!
//! ## Quick Start
//!
//! ```no_run
//! use revenue_forecast::data::QuarterlyFrame;
//! use revenue_forecast::forecast::one_year_outlook;
//! use revenue_forecast::metrics::compare_on_holdout;
//! use revenue_forecast::models::{NestedRevenueFit, SegmentRevenueFit};
//!
//! fn main() -> revenue_forecast::Result<()> {
//!     let frame = QuarterlyFrame::from_csv("data/quarterly_revenue.csv")?;
//!
//!     // Fit both revenue models on the twelve older quarters
//!     let training = frame.training()?;
//!     let segment = SegmentRevenueFit::fit(&training)?;
//!     let nested = NestedRevenueFit::fit(&training)?;
//!
//!     // Score them on the four withheld quarters
//!     let comparison = compare_on_holdout(&frame.holdout()?, &segment, &nested)?;
//!     println!("{comparison}");
//!
//!     // Extend the table one year ahead and price the trend forecasts
//!     let outlook = one_year_outlook(&frame)?;
//!     println!("{} forecast quarters", outlook.forecast_rows().len());
//!     Ok(())
//! }
//! ```

pub mod charts;
pub mod data;
pub mod describe;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use crate::data::{QuarterlyFrame, QuarterlyRecord};
pub use crate::error::{Result, RevenueError};
pub use crate::forecast::{one_year_outlook, RevenueOutlook};
pub use crate::metrics::HoldoutComparison;
pub use crate::models::{NestedRevenueFit, RevenuePredictor, SegmentRevenueFit};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
