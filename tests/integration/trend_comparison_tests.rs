use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use careops_analytics::models::inquiry::InquiryRecord;
use careops_analytics::models::trend::{TrendCategory, TrendPeriod};
use careops_analytics::{build_buckets, build_trend_series, comparison_range, filter_trend};

fn record(value: serde_json::Value) -> InquiryRecord {
    serde_json::from_value(value).expect("record")
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

#[test]
fn weekly_overlay_projects_the_prior_week_onto_the_same_axis() {
    let now = fixed_now();
    let records = vec![
        record(json!({ "created_at": "2025-06-12T10:00:00Z" })),
        record(json!({ "created_at": "2025-06-12T11:00:00Z" })),
        record(json!({ "created_at": "2025-06-15T09:00:00Z" })),
        record(json!({ "created_at": "2025-06-05T10:00:00Z" })),
        record(json!({ "date": "2025-06-03" })),
    ];

    let chart = build_trend_series(&records, TrendCategory::Overall, TrendPeriod::OneWeek, true, now);
    assert_eq!(chart.labels.len(), 7);
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].label, "Overall (Current Period)");
    assert_eq!(chart.series[1].label, "Overall (Previous Period)");
    assert_eq!(chart.series[0].points.len(), chart.series[1].points.len());

    let current: u64 = chart.series[0].points.iter().sum();
    let previous: u64 = chart.series[1].points.iter().sum();
    assert_eq!(current, 3);
    assert_eq!(previous, 2);

    // 12 June falls three days after the first boundary (9 June).
    assert_eq!(chart.series[0].points[3], 2);
    assert_eq!(chart.series[0].points[6], 1);
    // 5 June shifted by one week lands in the same 12 June bucket.
    assert_eq!(chart.series[1].points[3], 1);
}

#[test]
fn without_comparison_only_the_current_series_is_built() {
    let chart = build_trend_series(&[], TrendCategory::Overall, TrendPeriod::OneMonth, false, fixed_now());
    assert_eq!(chart.labels.len(), 30);
    assert_eq!(chart.series.len(), 1);
    assert!(chart.series[0].points.iter().all(|count| *count == 0));
}

#[test]
fn six_month_axis_labels_name_the_calendar_months() {
    let buckets = build_buckets(TrendPeriod::SixMonths, fixed_now());
    assert_eq!(
        buckets.labels,
        ["Jan '25", "Feb '25", "Mar '25", "Apr '25", "May '25", "Jun '25"]
    );
    assert!(buckets
        .boundaries
        .windows(2)
        .all(|pair| pair[0] < pair[1]));
    assert_eq!(*buckets.boundaries.last().unwrap(), fixed_now());
}

#[test]
fn comparison_window_has_equal_length_and_abuts_the_current_one() {
    for period in [
        TrendPeriod::OneWeek,
        TrendPeriod::OneMonth,
        TrendPeriod::ThreeMonths,
        TrendPeriod::SixMonths,
        TrendPeriod::OneYear,
    ] {
        let buckets = build_buckets(period, fixed_now());
        let previous = comparison_range(&buckets.range);
        assert_eq!(previous.length(), buckets.range.length());
        assert_eq!(previous.end, buckets.range.start);
    }
}

#[test]
fn category_filters_pick_channels_by_source_substring() {
    let now = fixed_now();
    let records = vec![
        record(json!({ "created_at": "2025-06-14T10:00:00Z", "source": "Website form" })),
        record(json!({ "created_at": "2025-06-14T10:00:00Z", "source": "WhatsApp broadcast" })),
        record(json!({ "created_at": "2025-06-14T10:00:00Z", "source": "Instagram reel" })),
        record(json!({ "created_at": "2025-06-14T10:00:00Z", "source": "email campaign" })),
        record(json!({ "created_at": "2025-06-14T10:00:00Z" })),
    ];
    let buckets = build_buckets(TrendPeriod::OneWeek, now);
    let start = buckets.range.start;
    let end = buckets.range.end;

    assert_eq!(filter_trend(&records, TrendCategory::Overall, start, end).len(), 5);
    assert_eq!(filter_trend(&records, TrendCategory::Web, start, end).len(), 1);
    assert_eq!(filter_trend(&records, TrendCategory::WhatsApp, start, end).len(), 1);
    assert_eq!(filter_trend(&records, TrendCategory::Social, start, end).len(), 1);
    assert_eq!(filter_trend(&records, TrendCategory::Email, start, end).len(), 1);
}

#[test]
fn records_without_usable_dates_never_reach_the_chart() {
    let now = fixed_now();
    let records = vec![
        record(json!({ "created_at": "not a date", "date": "also junk" })),
        record(json!({})),
        record(json!({ "created_at": "2025-06-14T10:00:00Z" })),
    ];

    let chart = build_trend_series(&records, TrendCategory::Overall, TrendPeriod::OneWeek, false, now);
    let total: u64 = chart.series[0].points.iter().sum();
    assert_eq!(total, 1);
}
