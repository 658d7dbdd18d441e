use chrono::NaiveDate;
use outlet_report::loader::load_json;
use outlet_report::{
    build_category_series, build_daily_series, compute_metrics, summarize, MetricsConfig,
    ReportFilter, ReportRecord,
};

fn record(date: (i32, u32, u32), lob: &str) -> ReportRecord {
    ReportRecord {
        id: format!("{:?}-{}", date, lob),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        outlet_name: "Grand Mall XXI".to_string(),
        line_of_business: lob.to_string(),
        ..Default::default()
    }
}

#[test]
fn ds_at_expected_spend_is_one_hundred() {
    let r = ReportRecord {
        fnb_revenue: 5_000_000.0,
        target_headcount: 100,
        ..record((2024, 9, 1), "Cinema")
    };
    assert_eq!(compute_metrics(&r, &MetricsConfig::default()).ds_percentage, 100.0);
}

#[test]
fn empty_record_has_zero_metrics() {
    let r = record((2024, 9, 1), "Cinema");
    let m = compute_metrics(&r, &MetricsConfig::default());
    assert_eq!(m.total_sales, 0.0);
    assert_eq!(m.per_head_fnb, 0.0);
}

#[test]
fn three_days_in_thirty_day_month() {
    let data = vec![
        record((2024, 9, 2), "Cinema"),
        record((2024, 9, 2), "Cafe"),
        record((2024, 9, 14), "Cinema"),
        record((2024, 9, 30), "Cafe"),
    ];
    let series = build_daily_series(&data, 2024, 9, &MetricsConfig::default());
    assert_eq!(series.len(), 30);
    assert_eq!(series.iter().filter(|b| b.has_data).count(), 3);
    assert!(series
        .iter()
        .filter(|b| !b.has_data)
        .all(|b| b.fnb_revenue == 0.0 && b.audience_count == 0 && b.outlet_count == 0));
}

#[test]
fn same_date_two_categories() {
    let data = vec![record((2024, 9, 5), "Cinema"), record((2024, 9, 5), "Cafe")];
    let rows = build_category_series(&data);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.count == 1));
}

#[test]
fn achievement_with_doubled_target() {
    let r = ReportRecord {
        fnb_revenue: 20_000_000.0,
        target_percentage: 200.0,
        ..record((2024, 9, 1), "Cinema")
    };
    assert_eq!(
        compute_metrics(&r, &MetricsConfig::default()).achievement_percentage,
        100.0
    );
}

#[test]
fn empty_input_degrades_to_zero() {
    let s = summarize(&[], &MetricsConfig::default());
    assert_eq!(s.record_count, 0);
    assert_eq!(s.avg_ds_percentage, 0.0);
    assert_eq!(s.avg_achievement_percentage, 0.0);
    assert!(build_category_series(&[]).is_empty());
    assert!(build_daily_series(&[], 2024, 9, &MetricsConfig::default())
        .iter()
        .all(|b| !b.has_data));
}

#[test]
fn api_payload_to_dashboard_numbers() {
    let body = r#"{"data": [
        {"id": 1, "date": "2024-09-01", "outlet": "Grand Mall XXI", "lob": "Cinema",
         "fnb": "5,000,000", "cinema": 3000000, "audience": 100, "target": 100},
        {"id": 2, "date": "2024-09-01", "outlet": "City Square", "lob": "Cafe",
         "fnb": 1000000, "audience": "oops", "target": 0},
        {"id": 3, "date": "tomorrow", "outlet": "City Square", "lob": "Cafe", "fnb": 999}
    ]}"#;
    let (records, report) = load_json(body).unwrap();
    assert_eq!(report.undated_rows, 1);

    let cafe = ReportFilter::for_month(2024, 9).with_category("Cafe").apply(&records);
    assert_eq!(cafe.len(), 2);

    let cfg = MetricsConfig::default();
    let series = build_daily_series(&records, 2024, 9, &cfg);
    let first = &series[0];
    assert_eq!(first.fnb_revenue, 6_000_000.0);
    assert_eq!(first.outlet_count, 2);
    // ds: (100 + 0) / 2, achievement: (50 + 10) / 2
    assert_eq!(first.ds_percentage, 50.0);
    assert_eq!(first.achievement_percentage, 30.0);

    // the undated row still counts toward the summary
    let s = summarize(&records, &cfg);
    assert_eq!(s.record_count, 3);
    assert_eq!(s.total_fnb_revenue, 6_000_999.0);
}
