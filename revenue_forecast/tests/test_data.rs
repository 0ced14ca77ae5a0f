use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use revenue_forecast::data::{QuarterlyFrame, QuarterlyRecord, HISTORY_LEN, HOLDOUT_LEN};
use std::io::Write;
use tempfile::NamedTempFile;

fn quarter_end(year: i32, month: u32) -> NaiveDate {
    let day = match month {
        2 => {
            if year % 4 == 0 {
                29
            } else {
                28
            }
        }
        5 | 8 => 31,
        _ => 30,
    };
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn history_frame() -> QuarterlyFrame {
    let mut records = Vec::new();
    let mut index = 0.0;
    for year in [2017, 2018, 2019, 2020] {
        for month in [2u32, 5, 8, 11] {
            index += 1.0;
            let wireline_customers = 3_400_000.0 - 10_000.0 * index;
            let wireless_customers = 1_300_000.0 + 20_000.0 * index;
            let wireline_rev = 190.0 * wireline_customers / 1e6;
            let wireless_rev = 170.0 * wireless_customers / 1e6;
            records.push(QuarterlyRecord {
                date: quarter_end(year, month),
                wireline_rev: Some(wireline_rev),
                wireless_rev: Some(wireless_rev),
                total_rev: Some(wireline_rev + wireless_rev),
                wireline_customers: Some(wireline_customers),
                wireless_customers: Some(wireless_customers),
            });
        }
    }
    records.reverse();
    QuarterlyFrame::from_records(records)
}

fn write_csv(rows: &[(&str, f64, f64, f64, f64, f64)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,wline_rev,wless_rev,tot_rev_mils,wline_cust_tot,wless_cust_tot"
    )
    .unwrap();
    for (date, wline, wless, tot, wline_cust, wless_cust) in rows {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            date, wline, wless, tot, wline_cust, wless_cust
        )
        .unwrap();
    }
    file
}

fn seventeen_rows() -> Vec<(&'static str, f64, f64, f64, f64, f64)> {
    vec![
        ("2020-11-30", 614.5, 277.6, 892.0, 3_219_627.0, 1_628_951.0),
        ("2020-08-31", 614.9, 272.8, 888.0, 3_227_841.0, 1_604_911.0),
        ("2020-05-31", 616.9, 271.5, 888.0, 3_243_070.0, 1_587_015.0),
        ("2020-02-29", 625.9, 264.7, 891.0, 3_259_128.0, 1_562_093.0),
        ("2019-11-30", 625.2, 263.8, 889.0, 3_272_133.0, 1_542_147.0),
        ("2019-08-31", 628.6, 257.5, 886.0, 3_288_167.0, 1_510_528.0),
        ("2019-05-31", 627.5, 252.3, 880.0, 3_298_358.0, 1_498_467.0),
        ("2019-02-28", 633.8, 249.2, 883.0, 3_310_679.0, 1_479_871.0),
        ("2018-11-30", 634.6, 246.5, 881.0, 3_320_867.0, 1_447_363.0),
        ("2018-08-31", 636.5, 239.9, 876.0, 3_330_122.0, 1_424_263.0),
        ("2018-05-31", 640.2, 237.9, 878.0, 3_348_551.0, 1_403_013.0),
        ("2018-02-28", 645.5, 235.8, 881.0, 3_360_764.0, 1_382_528.0),
        ("2017-11-30", 639.5, 231.2, 871.0, 3_365_144.0, 1_362_943.0),
        ("2017-08-31", 642.8, 227.6, 870.0, 3_384_813.0, 1_341_017.0),
        ("2017-05-31", 647.9, 221.3, 869.0, 3_397_779.0, 1_317_542.0),
        ("2017-02-28", 649.9, 217.8, 868.0, 3_406_805.0, 1_296_971.0),
        // An older quarter beyond the 16 the analysis keeps
        ("2016-11-30", 652.0, 214.0, 866.0, 3_410_212.0, 1_281_414.0),
    ]
}

#[test]
fn loader_keeps_sixteen_most_recent_rows_newest_first() {
    // Scramble the file order; the loader normalizes it
    let mut rows = seventeen_rows();
    rows.swap(0, 9);
    rows.swap(3, 16);
    let file = write_csv(&rows);

    let frame = QuarterlyFrame::from_csv(file.path()).unwrap();
    assert_eq!(frame.len(), HISTORY_LEN);

    let dates = frame.dates();
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2020, 11, 30).unwrap());
    assert_eq!(
        dates[HISTORY_LEN - 1],
        NaiveDate::from_ymd_opt(2017, 2, 28).unwrap()
    );
    // The 2016 quarter fell off the back
    assert!(dates
        .iter()
        .all(|d| *d > NaiveDate::from_ymd_opt(2016, 12, 31).unwrap()));
}

#[test]
fn loader_rejects_short_tables() {
    let rows = seventeen_rows();
    let file = write_csv(&rows[..10]);

    let result = QuarterlyFrame::from_csv(file.path());
    assert!(result.is_err());
}

#[test]
fn loader_rejects_non_numeric_values() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,wline_rev,wless_rev,tot_rev_mils,wline_cust_tot,wless_cust_tot"
    )
    .unwrap();
    writeln!(file, "2020-11-30,614.5,n/a,892,3219627,1628951").unwrap();

    let result = QuarterlyFrame::from_csv(file.path());
    assert!(result.is_err());
}

#[test]
fn loader_rejects_missing_columns() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,wline_rev,wless_rev").unwrap();
    writeln!(file, "2020-11-30,614.5,277.6").unwrap();

    let result = QuarterlyFrame::from_csv(file.path());
    assert!(result.is_err());
}

#[test]
fn loader_rejects_unparseable_dates() {
    let mut rows = seventeen_rows();
    rows[4].0 = "Q4 2019";
    let file = write_csv(&rows);

    let result = QuarterlyFrame::from_csv(file.path());
    assert!(result.is_err());
}

#[test]
fn sorting_is_idempotent() {
    let frame = history_frame();

    let once = frame.sorted_by_date();
    let twice = once.sorted_by_date();

    assert!(once.is_chronological());
    assert_eq!(once, twice);
}

#[test]
fn training_and_holdout_windows() {
    let frame = history_frame();

    let training = frame.training().unwrap();
    let holdout = frame.holdout().unwrap();
    assert_eq!(training.len(), HISTORY_LEN - HOLDOUT_LEN);
    assert_eq!(holdout.len(), HOLDOUT_LEN);

    // The holdout holds the four most recent quarters
    let newest = frame.last_date().unwrap();
    assert_eq!(holdout.dates()[0], newest);
    assert!(holdout
        .dates()
        .iter()
        .all(|d| *d > NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()));

    // Window slicing refuses a chronologically-sorted table
    assert!(frame.sorted_by_date().training().is_err());
}

#[test]
fn extension_appends_future_quarters() {
    let chronological = history_frame().sorted_by_date();
    let futures = vec![
        NaiveDate::from_ymd_opt(2021, 2, 28).unwrap(),
        NaiveDate::from_ymd_opt(2021, 5, 31).unwrap(),
        NaiveDate::from_ymd_opt(2021, 8, 31).unwrap(),
        NaiveDate::from_ymd_opt(2021, 11, 30).unwrap(),
    ];

    let extended = chronological.extend_with_quarters(&futures).unwrap();
    assert_eq!(extended.len(), 20);
    assert!(extended.records()[..16].iter().all(|r| !r.is_future()));
    assert!(extended.records()[16..].iter().all(|r| r.is_future()));

    // Trend index follows the extended length
    assert_eq!(chronological.trend_indices().last(), Some(&16.0));
    assert_eq!(extended.trend_indices(), (1..=20).map(f64::from).collect::<Vec<_>>());
}

#[test]
fn extension_rejects_out_of_order_input() {
    let newest_first = history_frame();
    let futures = vec![NaiveDate::from_ymd_opt(2021, 2, 28).unwrap()];
    assert!(newest_first.extend_with_quarters(&futures).is_err());

    // A date that does not follow the table is refused
    let chronological = newest_first.sorted_by_date();
    let stale = vec![NaiveDate::from_ymd_opt(2020, 11, 30).unwrap()];
    assert!(chronological.extend_with_quarters(&stale).is_err());
}
