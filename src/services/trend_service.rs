use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::inquiry::{InquiryRecord, ServiceStatus};
use crate::models::trend::{
    BucketUnit, DateRange, TemporalBuckets, TrendCategory, TrendChart, TrendPeriod, TrendSeries,
};

const EMAIL_KEYWORDS: &[&str] = &["email"];
const WEB_KEYWORDS: &[&str] = &["web", "form"];
const WHATSAPP_KEYWORDS: &[&str] = &["whatsapp"];
const SOCIAL_KEYWORDS: &[&str] = &["social", "facebook", "instagram"];

/// Builds the ordered bucket sequence for a look-back period.
///
/// Boundaries are generated backwards from `now`, one unit apart, so the
/// sequence is strictly increasing and the final boundary is exactly
/// `now` for every period, including short calendar months.
pub fn build_buckets(period: TrendPeriod, now: DateTime<Utc>) -> TemporalBuckets {
    let unit = period.bucket_unit();
    let count = period.bucket_count();
    let range = DateRange {
        start: period.window_start(now),
        end: now,
    };

    let mut labels = Vec::with_capacity(count);
    let mut boundaries = Vec::with_capacity(count);
    for index in 0..count {
        let steps_back = (count - 1 - index) as i64;
        let boundary = unit.step_back(now, steps_back);
        let label = match unit {
            BucketUnit::Day => boundary.format("%-d %b").to_string(),
            BucketUnit::Week => format!("Week {}", index + 1),
            BucketUnit::Month => boundary.format("%b '%y").to_string(),
        };
        labels.push(label);
        boundaries.push(boundary);
    }

    debug!(
        target: "careops::trend",
        period = period.as_str(),
        buckets = count,
        "built temporal buckets"
    );

    TemporalBuckets {
        labels,
        boundaries,
        unit,
        range,
    }
}

/// The equal-length window immediately preceding `range`. Not calendar
/// aligned: a 6-month window compares against the 6 months before it.
pub fn comparison_range(range: &DateRange) -> DateRange {
    let length = range.length();
    DateRange {
        start: range.start - length,
        end: range.end - length,
    }
}

/// Narrows a record collection to one chart category within an inclusive
/// date window. Records whose dates fail to parse are excluded.
pub fn filter_trend<'a>(
    records: &'a [InquiryRecord],
    category: TrendCategory,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<&'a InquiryRecord> {
    records
        .iter()
        .filter(|record| {
            record
                .trend_date()
                .map_or(false, |date| date >= start && date <= end)
        })
        .filter(|record| category_matches(category, record))
        .collect()
}

/// Chart-category predicate. `Active` here is looser than status
/// derivation rule 3: it does not require staffing. The table status and
/// the chart category are intentionally different views; keep them as
/// separate predicates.
fn category_matches(category: TrendCategory, record: &InquiryRecord) -> bool {
    let stored = record.stored_status();
    match category {
        TrendCategory::Overall => true,
        TrendCategory::Active => {
            matches!(stored, Some(ServiceStatus::Active))
                || (record.confirmed() && record.payment_made)
        }
        TrendCategory::Terminated => matches!(stored, Some(ServiceStatus::Terminated)),
        TrendCategory::NotInterested => matches!(stored, Some(ServiceStatus::NotInterested)),
        TrendCategory::Email => record.source_matches(EMAIL_KEYWORDS),
        TrendCategory::Web => record.source_matches(WEB_KEYWORDS),
        TrendCategory::WhatsApp => record.source_matches(WHATSAPP_KEYWORDS),
        TrendCategory::Social => record.source_matches(SOCIAL_KEYWORDS),
    }
}

/// Counts records per bucket. Each record lands in the first bucket whose
/// boundary is at or after its date; dates past the final boundary or
/// before the first bucket's start are dropped, so the totals conserve
/// exactly the in-window records.
///
/// With `shift` set, each date is moved forward by the period length
/// first, projecting a prior period onto the current bucket axis for
/// overlay comparison.
pub fn aggregate<'a, I>(records: I, buckets: &TemporalBuckets, shift: bool) -> Vec<u64>
where
    I: IntoIterator<Item = &'a InquiryRecord>,
{
    let mut points = vec![0u64; buckets.boundaries.len()];
    let Some(first_boundary) = buckets.boundaries.first().copied() else {
        return points;
    };
    let floor = buckets.unit.step_back(first_boundary, 1);
    let offset = buckets.range.length();

    for record in records {
        let Some(mut date) = record.trend_date() else {
            continue;
        };
        if shift {
            date += offset;
        }
        if date < floor {
            continue;
        }
        if let Some(slot) = buckets
            .boundaries
            .iter()
            .position(|boundary| date <= *boundary)
        {
            points[slot] += 1;
        }
    }

    points
}

/// Full chart pipeline: buckets, primary series, and in comparison mode
/// the shifted prior-period overlay.
pub fn build_trend_series(
    records: &[InquiryRecord],
    category: TrendCategory,
    period: TrendPeriod,
    compare: bool,
    now: DateTime<Utc>,
) -> TrendChart {
    let buckets = build_buckets(period, now);

    let primary = filter_trend(records, category, buckets.range.start, buckets.range.end);
    let mut series = vec![TrendSeries {
        label: format!("{} (Current Period)", category.as_str()),
        points: aggregate(primary, &buckets, false),
    }];

    if compare {
        let previous = comparison_range(&buckets.range);
        let matched = filter_trend(records, category, previous.start, previous.end);
        series.push(TrendSeries {
            label: format!("{} (Previous Period)", category.as_str()),
            points: aggregate(matched, &buckets, true),
        });
    }

    debug!(
        target: "careops::trend",
        category = category.as_str(),
        period = period.as_str(),
        compare,
        "built trend series"
    );

    TrendChart {
        labels: buckets.labels,
        series,
    }
}
