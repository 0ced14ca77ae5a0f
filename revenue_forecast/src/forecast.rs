//! One-year-ahead forecasting stages
//!
//! The forecast composes the customer-count trend models with the
//! full-sample refit of the total revenue model: future customer counts
//! come off the fitted trend lines, and the refreshed per-customer
//! coefficients price those counts into revenue.

use chrono::{Datelike, Months, NaiveDate};
use revenue_math::rounding::round_to_places;

use crate::data::{QuarterlyFrame, FORECAST_HORIZON, HISTORY_LEN};
use crate::error::{Result, RevenueError};
use crate::models::{CustomerTrends, NestedRevenueFit, CAD_PER_MILLION};

/// Revenue per wireline customer from the training-window fit of the
/// total revenue model, CAD per quarter. Retained so the forecast can be
/// re-priced with pre-refresh coefficients as a sensitivity check.
pub const PRIOR_WIRELINE_BETA: f64 = 181.57;

/// Revenue per wireless customer from the same training-window fit.
pub const PRIOR_WIRELESS_BETA: f64 = 215.14;

/// Quarter-end dates following `last`: three calendar months forward at a
/// time, snapped to the end of the month.
pub fn next_quarter_ends(last: NaiveDate, count: usize) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(count);
    let mut current = last;
    for _ in 0..count {
        current = quarter_end_after(current)?;
        dates.push(current);
    }
    Ok(dates)
}

fn quarter_end_after(date: NaiveDate) -> Result<NaiveDate> {
    let shifted = date
        .checked_add_months(Months::new(3))
        .ok_or_else(|| {
            RevenueError::ForecastingError(format!("no representable quarter end after {}", date))
        })?;
    month_end(shifted)
}

fn month_end(date: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .ok_or_else(|| {
            RevenueError::ForecastingError(format!("no representable month end for {}", date))
        })
}

/// One quarter of the combined actual-and-forecast revenue series.
#[derive(Debug, Clone)]
pub struct OutlookRow {
    /// Quarter-end date
    pub date: NaiveDate,
    /// 1-based chronological trend index
    pub trend_index: usize,
    /// Reported total revenue, CAD millions; `None` for future quarters
    pub actual_total_rev: Option<f64>,
    /// Trend-predicted wireline customers, rounded
    pub wireline_customers_forecast: f64,
    /// Trend-predicted wireless customers, rounded
    pub wireless_customers_forecast: f64,
    /// Forecast total revenue from the refreshed coefficients, CAD
    /// millions, two decimal places
    pub total_rev_forecast: f64,
    /// Forecast total revenue from the retained training-window
    /// coefficients, CAD millions, two decimal places
    pub total_rev_forecast_prior_betas: f64,
}

/// The one-year-ahead revenue outlook across history and horizon.
#[derive(Debug, Clone)]
pub struct RevenueOutlook {
    rows: Vec<OutlookRow>,
    trends: CustomerTrends,
    full_sample_fit: NestedRevenueFit,
}

impl RevenueOutlook {
    /// All rows, oldest first: 16 historical quarters then the horizon.
    pub fn rows(&self) -> &[OutlookRow] {
        &self.rows
    }

    /// The appended future quarters only.
    pub fn forecast_rows(&self) -> &[OutlookRow] {
        &self.rows[self.rows.len() - FORECAST_HORIZON..]
    }

    /// The fitted customer-count trend models.
    pub fn customer_trends(&self) -> &CustomerTrends {
        &self.trends
    }

    /// The total revenue model refitted on the full historical sample.
    pub fn full_sample_fit(&self) -> &NestedRevenueFit {
        &self.full_sample_fit
    }
}

/// Build the one-year-ahead outlook from the 16-quarter historical table.
///
/// Stages, in order: chronological sort and trend indexing, per-segment
/// trend fits, extension with four future quarter ends, full-sample refit
/// of the total revenue model, then re-pricing of the whole span from the
/// trend-predicted customer counts.
pub fn one_year_outlook(history: &QuarterlyFrame) -> Result<RevenueOutlook> {
    if history.len() != HISTORY_LEN {
        return Err(RevenueError::ValidationError(format!(
            "the outlook starts from the {}-row historical table, got {} rows",
            HISTORY_LEN,
            history.len()
        )));
    }

    let chronological = history.sorted_by_date();
    let trends = CustomerTrends::fit(&chronological)?;

    let future_dates = next_quarter_ends(chronological.last_date()?, FORECAST_HORIZON)?;
    let extended = chronological.extend_with_quarters(&future_dates)?;

    // Refreshed coefficients come from the historical rows only; the
    // appended quarters have no actuals to fit against.
    let full_sample_fit = NestedRevenueFit::fit(&chronological)?;

    let rows = extended
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let trend_index = i + 1;
            let wireline = trends.wireline().predict_count(trend_index as f64);
            let wireless = trends.wireless().predict_count(trend_index as f64);

            let refreshed = full_sample_fit.predict_total_raw(wireline, wireless);
            let prior = (PRIOR_WIRELINE_BETA * wireline + PRIOR_WIRELESS_BETA * wireless)
                / CAD_PER_MILLION;

            OutlookRow {
                date: record.date,
                trend_index,
                actual_total_rev: record.total_rev,
                wireline_customers_forecast: wireline,
                wireless_customers_forecast: wireless,
                total_rev_forecast: round_to_places(refreshed, 2),
                total_rev_forecast_prior_betas: round_to_places(prior, 2),
            }
        })
        .collect();

    Ok(RevenueOutlook {
        rows,
        trends,
        full_sample_fit,
    })
}
