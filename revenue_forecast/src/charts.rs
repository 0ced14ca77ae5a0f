//! Time-series chart rendering using Plotters
//!
//! Every chart is a dated scatter plot written to a PNG file: `%Y-%m`
//! tick labels on the quarter axis and comma-grouped numbers on the value
//! axis, matching how the figures read in the quarterly statements.

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

use crate::data::QuarterlyFrame;
use crate::error::{Result, RevenueError};
use crate::forecast::RevenueOutlook;

const CHART_SIZE: (u32, u32) = (900, 600);

const WIRELINE_COLOR: RGBColor = BLUE;
const WIRELESS_COLOR: RGBColor = RED;
const ACTUAL_COLOR: RGBColor = BLACK;
const PREDICTED_COLOR: RGBColor = RGBColor(255, 140, 0);

struct ScatterSeries<'a> {
    label: Option<&'a str>,
    color: RGBColor,
    points: Vec<(NaiveDate, f64)>,
}

/// Wireline and wireless revenue per quarter, one colored series each.
pub fn segment_revenue_chart(frame: &QuarterlyFrame, path: &Path) -> Result<()> {
    render_scatter(
        path,
        "Segment Revenue",
        "CAD (Millions)",
        &[
            ScatterSeries {
                label: Some("Wireline"),
                color: WIRELINE_COLOR,
                points: dated_points(frame, |r| r.wireline_rev),
            },
            ScatterSeries {
                label: Some("Wireless"),
                color: WIRELESS_COLOR,
                points: dated_points(frame, |r| r.wireless_rev),
            },
        ],
    )
}

/// Reported total revenue per quarter.
pub fn total_revenue_chart(frame: &QuarterlyFrame, path: &Path) -> Result<()> {
    render_scatter(
        path,
        "Total Revenue",
        "CAD (Millions)",
        &[ScatterSeries {
            label: None,
            color: WIRELINE_COLOR,
            points: dated_points(frame, |r| r.total_rev),
        }],
    )
}

/// Wireline customer counts per quarter.
pub fn wireline_customers_chart(frame: &QuarterlyFrame, path: &Path) -> Result<()> {
    render_scatter(
        path,
        "Wireline Customers",
        "Customers",
        &[ScatterSeries {
            label: None,
            color: WIRELINE_COLOR,
            points: dated_points(frame, |r| r.wireline_customers),
        }],
    )
}

/// Wireless customer counts per quarter.
pub fn wireless_customers_chart(frame: &QuarterlyFrame, path: &Path) -> Result<()> {
    render_scatter(
        path,
        "Wireless Customers",
        "Customers",
        &[ScatterSeries {
            label: None,
            color: WIRELESS_COLOR,
            points: dated_points(frame, |r| r.wireless_customers),
        }],
    )
}

/// Actual total revenue against the forecast series across history and
/// the one-year-ahead horizon.
pub fn actual_vs_predicted_chart(outlook: &RevenueOutlook, path: &Path) -> Result<()> {
    let actual: Vec<(NaiveDate, f64)> = outlook
        .rows()
        .iter()
        .filter_map(|r| r.actual_total_rev.map(|v| (r.date, v)))
        .collect();
    let predicted: Vec<(NaiveDate, f64)> = outlook
        .rows()
        .iter()
        .map(|r| (r.date, r.total_rev_forecast))
        .collect();

    render_scatter(
        path,
        "Actual vs. Predictions",
        "Revenue",
        &[
            ScatterSeries {
                label: Some("Actual Revenue"),
                color: ACTUAL_COLOR,
                points: actual,
            },
            ScatterSeries {
                label: Some("Predicted Revenue"),
                color: PREDICTED_COLOR,
                points: predicted,
            },
        ],
    )
}

fn dated_points<F>(frame: &QuarterlyFrame, field: F) -> Vec<(NaiveDate, f64)>
where
    F: Fn(&crate::data::QuarterlyRecord) -> Option<f64>,
{
    frame
        .records()
        .iter()
        .filter_map(|r| field(r).map(|v| (r.date, v)))
        .collect()
}

fn render_scatter(
    path: &Path,
    title: &str,
    y_desc: &str,
    series: &[ScatterSeries<'_>],
) -> Result<()> {
    let all_points: Vec<&(NaiveDate, f64)> = series.iter().flat_map(|s| s.points.iter()).collect();
    if all_points.is_empty() {
        return Err(RevenueError::ChartError(format!(
            "chart '{}' has no data points",
            title
        )));
    }

    let first_date = all_points[0].0;
    let date_min = all_points.iter().map(|(d, _)| *d).min().unwrap_or(first_date);
    let date_max = all_points.iter().map(|(d, _)| *d).max().unwrap_or(first_date);
    let value_min = all_points
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::INFINITY, f64::min);
    let value_max = all_points
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    let x_from = date_min - Duration::days(45);
    let x_to = date_max + Duration::days(45);
    let pad = ((value_max - value_min) * 0.05).max(1.0);
    let y_from = value_min - pad;
    let y_to = value_max + pad;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_from..x_to, y_from..y_to)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Quarter")
        .y_desc(y_desc)
        .x_labels(12)
        .x_label_formatter(&|d| d.format("%Y-%m").to_string())
        .y_label_formatter(&|v| comma_grouped(*v))
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(chart_err)?;

    let mut has_legend = false;
    for s in series {
        let drawn = chart
            .draw_series(
                s.points
                    .iter()
                    .map(|(d, v)| Circle::new((*d, *v), 4, s.color.filled())),
            )
            .map_err(chart_err)?;

        if let Some(label) = s.label {
            let color = s.color;
            drawn
                .label(label)
                .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));
            has_legend = true;
        }
    }

    if has_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(chart_err)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Format a value with comma-grouped thousands, e.g. `3,259,128`.
fn comma_grouped(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        grouped.push(ch);
        if remaining > 1 && (remaining - 1) % 3 == 0 {
            grouped.push(',');
        }
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn chart_err<E: std::fmt::Display>(err: E) -> RevenueError {
    RevenueError::ChartError(err.to_string())
}
