//! Error types for the revenue_forecast crate

use thiserror::Error;

/// Custom error types for the revenue_forecast crate
#[derive(Debug, Error)]
pub enum RevenueError {
    /// Error raised while loading or validating the quarterly table
    #[error("Data error: {0}")]
    DataError(String),

    /// Error raised while fitting a model
    #[error("Fit error: {0}")]
    FitError(String),

    /// Error raised while producing forecasts
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from parameter or window validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error raised while rendering a chart
    #[error("Chart error: {0}")]
    ChartError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from regression calculations
    #[error("Math error: {0}")]
    MathError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, RevenueError>;

impl From<csv::Error> for RevenueError {
    fn from(err: csv::Error) -> Self {
        RevenueError::CsvError(err.to_string())
    }
}

impl From<revenue_math::MathError> for RevenueError {
    fn from(err: revenue_math::MathError) -> Self {
        RevenueError::MathError(err.to_string())
    }
}
