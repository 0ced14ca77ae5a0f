use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use revenue_forecast::data::{QuarterlyFrame, QuarterlyRecord};
use revenue_forecast::models::{
    CustomerTrends, NestedRevenueFit, RevenuePredictor, SegmentRevenueFit,
};

const WIRELINE_RATE: f64 = 190.0;
const WIRELESS_RATE: f64 = 170.0;

/// Twelve chronological quarters where revenue is exactly proportional to
/// customer counts at the rates above.
fn proportional_frame() -> QuarterlyFrame {
    let records = (1..=12u32)
        .map(|i| {
            let wireline_customers = 3_400_000.0 - 10_000.0 * f64::from(i);
            let wireless_customers = 1_300_000.0 + 20_000.0 * f64::from(i);
            let wireline_rev = WIRELINE_RATE * wireline_customers / 1e6;
            let wireless_rev = WIRELESS_RATE * wireless_customers / 1e6;
            QuarterlyRecord {
                date: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()
                    + chrono::Duration::days(91 * i64::from(i)),
                wireline_rev: Some(wireline_rev),
                wireless_rev: Some(wireless_rev),
                total_rev: Some(wireline_rev + wireless_rev),
                wireline_customers: Some(wireline_customers),
                wireless_customers: Some(wireless_customers),
            }
        })
        .collect();
    QuarterlyFrame::from_records(records)
}

#[test]
fn segment_models_recover_planted_rates() {
    let fit = SegmentRevenueFit::fit(&proportional_frame()).unwrap();

    assert_approx_eq!(fit.wireline_per_customer(), WIRELINE_RATE, 1e-6);
    assert_approx_eq!(fit.wireless_per_customer(), WIRELESS_RATE, 1e-6);
    assert_approx_eq!(fit.per_customer_spread(), WIRELINE_RATE - WIRELESS_RATE, 1e-6);
    assert!(fit.wireline_r_squared() > 0.999999);
    assert!(fit.wireless_r_squared() > 0.999999);
}

#[test]
fn nested_model_recovers_planted_rates() {
    let fit = NestedRevenueFit::fit(&proportional_frame()).unwrap();

    assert_approx_eq!(fit.wireline_per_customer(), WIRELINE_RATE, 1e-4);
    assert_approx_eq!(fit.wireless_per_customer(), WIRELESS_RATE, 1e-4);
    assert!(fit.r_squared() > 0.999999);
}

#[test]
fn nested_model_surfaces_collinear_counts() {
    // Wireless counts are an exact multiple of wireline counts
    let records = (1..=12u32)
        .map(|i| {
            let wireline_customers = 3_000_000.0 + 5_000.0 * f64::from(i);
            QuarterlyRecord {
                date: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()
                    + chrono::Duration::days(91 * i64::from(i)),
                wireline_rev: Some(600.0),
                wireless_rev: Some(250.0),
                total_rev: Some(850.0),
                wireline_customers: Some(wireline_customers),
                wireless_customers: Some(wireline_customers * 0.5),
            }
        })
        .collect();
    let frame = QuarterlyFrame::from_records(records);

    let err = NestedRevenueFit::fit(&frame).unwrap_err();
    assert!(err.to_string().contains("Singular design matrix"));
}

#[test]
fn predictions_combine_and_round_per_customer_rates() {
    let frame = proportional_frame();
    let segment = SegmentRevenueFit::fit(&frame).unwrap();
    let nested = NestedRevenueFit::fit(&frame).unwrap();

    let wireline_customers = 3_251_000.0;
    let wireless_customers = 1_500_000.0;
    let expected = ((WIRELINE_RATE * wireline_customers + WIRELESS_RATE * wireless_customers)
        / 1e6)
        .round();

    assert_approx_eq!(
        segment.predict_total(wireline_customers, wireless_customers),
        expected,
        1e-9
    );
    assert_approx_eq!(
        nested.predict_total(wireline_customers, wireless_customers),
        expected,
        1e-9
    );

    // Per-segment contributions round the same way
    let wireline_expected = (WIRELINE_RATE * wireline_customers / 1e6).round();
    assert_approx_eq!(segment.predict_wireline(wireline_customers), wireline_expected, 1e-9);
    assert_approx_eq!(nested.predict_wireline(wireline_customers), wireline_expected, 1e-9);
}

#[test]
fn trend_models_recover_straight_lines() {
    let frame = proportional_frame();
    let trends = CustomerTrends::fit(&frame).unwrap();

    assert_approx_eq!(trends.wireline().intercept(), 3_400_000.0, 1e-4);
    assert_approx_eq!(trends.wireline().slope(), -10_000.0, 1e-6);
    assert_approx_eq!(trends.wireless().intercept(), 1_300_000.0, 1e-4);
    assert_approx_eq!(trends.wireless().slope(), 20_000.0, 1e-6);
    assert!(trends.wireline().r_squared() > 0.999999);

    // Reading the line off at a future index gives a whole customer count
    assert_approx_eq!(trends.wireline().predict_count(20.0), 3_200_000.0, 1e-9);
}

#[test]
fn trend_models_require_chronological_order() {
    let mut records: Vec<QuarterlyRecord> = proportional_frame().records().to_vec();
    records.reverse();
    let newest_first = QuarterlyFrame::from_records(records);

    assert!(CustomerTrends::fit(&newest_first).is_err());
}

#[test]
fn model_names_identify_the_specification() {
    let frame = proportional_frame();
    let segment = SegmentRevenueFit::fit(&frame).unwrap();
    let nested = NestedRevenueFit::fit(&frame).unwrap();

    assert_eq!(segment.name(), "individual segment models");
    assert_eq!(nested.name(), "total revenue model");
}
