//! Fixed end-to-end quarterly outlook run
//!
//! Loads the quarterly table, renders the descriptive charts, compares the
//! two revenue models out of sample, and produces the one-year-ahead
//! forecast with its actual-vs-predicted chart. No flags; the input and
//! output paths are fixed.

use std::fs;
use std::path::Path;
use std::process;

use revenue_forecast::charts;
use revenue_forecast::data::QuarterlyFrame;
use revenue_forecast::describe;
use revenue_forecast::forecast::{self, PRIOR_WIRELESS_BETA, PRIOR_WIRELINE_BETA};
use revenue_forecast::metrics;
use revenue_forecast::models::{NestedRevenueFit, RevenuePredictor, SegmentRevenueFit};
use revenue_forecast::Result;

const INPUT_PATH: &str = "data/quarterly_revenue.csv";
const CHART_DIR: &str = "charts";

fn main() {
    if let Err(err) = run() {
        eprintln!("quarterly outlook failed: {err}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let frame = QuarterlyFrame::from_csv(INPUT_PATH)?;
    if let (Some(newest), Some(oldest)) = (frame.records().first(), frame.records().last()) {
        println!(
            "Loaded {} quarters, {} back to {}",
            frame.len(),
            newest.date,
            oldest.date
        );
    }

    println!("\nDescriptive summary:");
    print!("{}", describe::summarize(&frame)?);

    fs::create_dir_all(CHART_DIR)?;
    let chart_dir = Path::new(CHART_DIR);
    charts::segment_revenue_chart(&frame, &chart_dir.join("segment_revenue.png"))?;
    charts::total_revenue_chart(&frame, &chart_dir.join("total_revenue.png"))?;
    charts::wireline_customers_chart(&frame, &chart_dir.join("wireline_customers.png"))?;
    charts::wireless_customers_chart(&frame, &chart_dir.join("wireless_customers.png"))?;

    let training = frame.training()?;
    let segment = SegmentRevenueFit::fit(&training)?;
    let nested = NestedRevenueFit::fit(&training)?;
    let averages = describe::average_revenue_per_customer(&training)?;

    println!("\nRevenue per customer, CAD per quarter (training window):");
    println!(
        "  {:<28} {:>10} {:>10} {:>10}",
        "estimator", "wireline", "wireless", "spread"
    );
    println!(
        "  {:<28} {:>10.2} {:>10.2} {:>10.2}",
        segment.name(),
        segment.wireline_per_customer(),
        segment.wireless_per_customer(),
        segment.per_customer_spread()
    );
    println!(
        "  {:<28} {:>10.2} {:>10.2} {:>10.2}",
        nested.name(),
        nested.wireline_per_customer(),
        nested.wireless_per_customer(),
        nested.per_customer_spread()
    );
    println!(
        "  {:<28} {:>10.2} {:>10.2} {:>10.2}",
        "per-quarter averaging",
        averages.wireline_per_customer(),
        averages.wireless_per_customer(),
        averages.per_customer_spread()
    );

    let comparison = metrics::compare_on_holdout(&frame.holdout()?, &segment, &nested)?;
    println!();
    print!("{comparison}");

    let outlook = forecast::one_year_outlook(&frame)?;
    let trends = outlook.customer_trends();
    println!("\nCustomer-count trends (customers per quarter):");
    println!(
        "  wireline: intercept {:.0}, slope {:.0}, R^2 {:.3}",
        trends.wireline().intercept(),
        trends.wireline().slope(),
        trends.wireline().r_squared()
    );
    println!(
        "  wireless: intercept {:.0}, slope {:.0}, R^2 {:.3}",
        trends.wireless().intercept(),
        trends.wireless().slope(),
        trends.wireless().r_squared()
    );

    let refreshed = outlook.full_sample_fit();
    println!(
        "\nFull-sample total revenue model: wireline {:.2}, wireless {:.2} CAD per customer",
        refreshed.wireline_per_customer(),
        refreshed.wireless_per_customer()
    );
    println!(
        "Sensitivity betas (training-window fit): wireline {:.2}, wireless {:.2}",
        PRIOR_WIRELINE_BETA, PRIOR_WIRELESS_BETA
    );

    println!("\nOne-year-ahead forecast:");
    println!(
        "  {:<12} {:>12} {:>12} {:>10} {:>12}",
        "quarter", "wireline", "wireless", "forecast", "prior betas"
    );
    for row in outlook.forecast_rows() {
        println!(
            "  {:<12} {:>12.0} {:>12.0} {:>10.2} {:>12.2}",
            row.date.format("%Y-%m-%d"),
            row.wireline_customers_forecast,
            row.wireless_customers_forecast,
            row.total_rev_forecast,
            row.total_rev_forecast_prior_betas
        );
    }

    charts::actual_vs_predicted_chart(&outlook, &chart_dir.join("actual_vs_predicted.png"))?;
    println!("\nCharts written to {}/", CHART_DIR);

    Ok(())
}
