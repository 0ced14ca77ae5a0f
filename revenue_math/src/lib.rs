//! # Revenue Math
//!
//! Regression primitives for segment revenue analysis.
//! This crate provides the ordinary-least-squares fits used by the
//! revenue-per-customer and customer-trend models, along with the
//! rounding conventions applied to their outputs.

use thiserror::Error;

pub mod regression;
pub mod rounding;

/// Errors that can occur in regression calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular design matrix: {0}")]
    SingularMatrix(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for regression operations
pub type Result<T> = std::result::Result<T, MathError>;
