//! The quarterly revenue and customer-count table

use crate::error::{Result, RevenueError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Number of historical quarters the analysis uses.
pub const HISTORY_LEN: usize = 16;

/// Number of most-recent quarters withheld from fitting and used only to
/// score out-of-sample accuracy.
pub const HOLDOUT_LEN: usize = 4;

/// Number of future quarters appended for the one-year-ahead forecast.
pub const FORECAST_HORIZON: usize = 4;

/// One row of the input file, in its published column layout.
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    wline_rev: f64,
    wless_rev: f64,
    tot_rev_mils: f64,
    wline_cust_tot: f64,
    wless_cust_tot: f64,
}

/// A single quarterly observation.
///
/// Revenue figures are in CAD millions, customer counts in customers.
/// Appended future quarters carry a date but `None` for every actual.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterlyRecord {
    /// Quarter-end date
    pub date: NaiveDate,
    /// Wireline segment revenue
    pub wireline_rev: Option<f64>,
    /// Wireless segment revenue
    pub wireless_rev: Option<f64>,
    /// Reported total revenue
    pub total_rev: Option<f64>,
    /// Wireline customers at quarter end
    pub wireline_customers: Option<f64>,
    /// Wireless customers at quarter end
    pub wireless_customers: Option<f64>,
}

impl QuarterlyRecord {
    /// A future quarter: known date, no actuals yet.
    pub fn future(date: NaiveDate) -> Self {
        Self {
            date,
            wireline_rev: None,
            wireless_rev: None,
            total_rev: None,
            wireline_customers: None,
            wireless_customers: None,
        }
    }

    /// Whether this row is an appended future quarter.
    pub fn is_future(&self) -> bool {
        self.total_rev.is_none()
    }
}

/// The in-memory quarterly table.
///
/// Loading normalizes the table to newest-first order, matching the
/// published-statement layout: the holdout window is rows `0..4` and the
/// training window rows `4..16`. The forecasting stages re-sort the table
/// oldest-first before assigning the trend index.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterlyFrame {
    records: Vec<QuarterlyRecord>,
}

impl QuarterlyFrame {
    /// Load the quarterly table from a CSV file.
    ///
    /// The file must carry the columns
    /// `date,wline_rev,wless_rev,tot_rev_mils,wline_cust_tot,wless_cust_tot`
    /// and at least [`HISTORY_LEN`] rows; only the [`HISTORY_LEN`] most
    /// recent quarters are kept.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            RevenueError::DataError(format!("failed to open {}: {}", path.display(), e))
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize::<RawRecord>() {
            let raw = row?;
            records.push(QuarterlyRecord {
                date: parse_quarter_date(&raw.date)?,
                wireline_rev: Some(raw.wline_rev),
                wireless_rev: Some(raw.wless_rev),
                total_rev: Some(raw.tot_rev_mils),
                wireline_customers: Some(raw.wline_cust_tot),
                wireless_customers: Some(raw.wless_cust_tot),
            });
        }

        if records.len() < HISTORY_LEN {
            return Err(RevenueError::DataError(format!(
                "expected at least {} quarterly rows, found {}",
                HISTORY_LEN,
                records.len()
            )));
        }

        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(HISTORY_LEN);

        Ok(Self { records })
    }

    /// Build a frame directly from records (used by pipeline stages and tests).
    pub fn from_records(records: Vec<QuarterlyRecord>) -> Self {
        Self { records }
    }

    /// The rows in their current order.
    pub fn records(&self) -> &[QuarterlyRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Quarter-end dates in row order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Most recent quarter-end date in the table.
    pub fn last_date(&self) -> Result<NaiveDate> {
        self.records
            .iter()
            .map(|r| r.date)
            .max()
            .ok_or_else(|| RevenueError::DataError("table has no rows".to_string()))
    }

    /// Wireline revenue column; errors if any row is missing a value.
    pub fn wireline_revenues(&self) -> Result<Vec<f64>> {
        self.complete_column("wline_rev", |r| r.wireline_rev)
    }

    /// Wireless revenue column; errors if any row is missing a value.
    pub fn wireless_revenues(&self) -> Result<Vec<f64>> {
        self.complete_column("wless_rev", |r| r.wireless_rev)
    }

    /// Total revenue column; errors if any row is missing a value.
    pub fn total_revenues(&self) -> Result<Vec<f64>> {
        self.complete_column("tot_rev_mils", |r| r.total_rev)
    }

    /// Wireline customer-count column; errors if any row is missing a value.
    pub fn wireline_customers(&self) -> Result<Vec<f64>> {
        self.complete_column("wline_cust_tot", |r| r.wireline_customers)
    }

    /// Wireless customer-count column; errors if any row is missing a value.
    pub fn wireless_customers(&self) -> Result<Vec<f64>> {
        self.complete_column("wless_cust_tot", |r| r.wireless_customers)
    }

    /// Rows `start..end` as a new frame.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || end > self.records.len() {
            return Err(RevenueError::ValidationError(format!(
                "slice {}..{} out of bounds for {} rows",
                start,
                end,
                self.records.len()
            )));
        }

        Ok(Self {
            records: self.records[start..end].to_vec(),
        })
    }

    /// The twelve older quarters the models are fitted on.
    pub fn training(&self) -> Result<Self> {
        self.expect_newest_first()?;
        self.slice(HOLDOUT_LEN, HISTORY_LEN)
    }

    /// The four most recent quarters withheld for out-of-sample scoring.
    pub fn holdout(&self) -> Result<Self> {
        self.expect_newest_first()?;
        self.slice(0, HOLDOUT_LEN)
    }

    /// A copy of the table sorted oldest-first.
    ///
    /// The sort is stable, so re-sorting an already-chronological table
    /// leaves the row order untouched.
    pub fn sorted_by_date(&self) -> Self {
        let mut records = self.records.clone();
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    /// Whether rows run oldest-first.
    pub fn is_chronological(&self) -> bool {
        self.records.windows(2).all(|w| w[0].date <= w[1].date)
    }

    /// Append future quarters to a chronological table.
    ///
    /// The dates must continue the table: strictly increasing and later
    /// than the last historical quarter end.
    pub fn extend_with_quarters(&self, dates: &[NaiveDate]) -> Result<Self> {
        if !self.is_chronological() {
            return Err(RevenueError::ValidationError(
                "future quarters can only extend a chronologically-ordered table".to_string(),
            ));
        }

        let mut previous = self.last_date()?;
        for date in dates {
            if *date <= previous {
                return Err(RevenueError::ValidationError(format!(
                    "future quarter {} does not follow {}",
                    date, previous
                )));
            }
            previous = *date;
        }

        let mut records = self.records.clone();
        records.extend(dates.iter().map(|d| QuarterlyRecord::future(*d)));
        Ok(Self { records })
    }

    /// The 1-based sequential trend index for a chronological table.
    pub fn trend_indices(&self) -> Vec<f64> {
        (1..=self.records.len()).map(|i| i as f64).collect()
    }

    fn expect_newest_first(&self) -> Result<()> {
        if self.records.len() != HISTORY_LEN {
            return Err(RevenueError::ValidationError(format!(
                "window slicing expects the {}-row historical table, got {} rows",
                HISTORY_LEN,
                self.records.len()
            )));
        }
        let newest_first = self.records.windows(2).all(|w| w[0].date >= w[1].date);
        if !newest_first {
            return Err(RevenueError::ValidationError(
                "window slicing expects the newest-first historical table".to_string(),
            ));
        }
        Ok(())
    }

    fn complete_column<F>(&self, name: &str, field: F) -> Result<Vec<f64>>
    where
        F: Fn(&QuarterlyRecord) -> Option<f64>,
    {
        self.records
            .iter()
            .map(|r| {
                field(r).ok_or_else(|| {
                    RevenueError::DataError(format!("column '{}' is missing a value at {}", name, r.date))
                })
            })
            .collect()
    }
}

fn parse_quarter_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y%m%d"))
        .map_err(|_| RevenueError::DataError(format!("unparseable quarter-end date '{}'", raw)))
}
