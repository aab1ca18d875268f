use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Look-back window selectable on the trend chart. The period fixes both
/// the bucket granularity and the bucket count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrendPeriod {
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl TrendPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendPeriod::OneWeek => "1w",
            TrendPeriod::OneMonth => "1m",
            TrendPeriod::ThreeMonths => "3m",
            TrendPeriod::SixMonths => "6m",
            TrendPeriod::OneYear => "1y",
        }
    }

    pub fn bucket_unit(&self) -> BucketUnit {
        match self {
            TrendPeriod::OneWeek | TrendPeriod::OneMonth => BucketUnit::Day,
            TrendPeriod::ThreeMonths => BucketUnit::Week,
            TrendPeriod::SixMonths | TrendPeriod::OneYear => BucketUnit::Month,
        }
    }

    pub fn bucket_count(&self) -> usize {
        match self {
            TrendPeriod::OneWeek => 7,
            TrendPeriod::OneMonth => 30,
            TrendPeriod::ThreeMonths => 12,
            TrendPeriod::SixMonths => 6,
            TrendPeriod::OneYear => 12,
        }
    }

    /// Window start, `lookback` before `now`. Month-based periods use
    /// calendar month arithmetic, clamped to the last valid day of
    /// shorter months.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TrendPeriod::OneWeek => now - Duration::days(7),
            TrendPeriod::OneMonth => sub_months(now, 1),
            TrendPeriod::ThreeMonths => sub_months(now, 3),
            TrendPeriod::SixMonths => sub_months(now, 6),
            TrendPeriod::OneYear => sub_months(now, 12),
        }
    }
}

impl Default for TrendPeriod {
    fn default() -> Self {
        TrendPeriod::SixMonths
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BucketUnit {
    Day,
    Week,
    Month,
}

impl BucketUnit {
    /// The moment `steps` whole units before `end`.
    pub fn step_back(&self, end: DateTime<Utc>, steps: i64) -> DateTime<Utc> {
        match self {
            BucketUnit::Day => end - Duration::days(steps),
            BucketUnit::Week => end - Duration::weeks(steps),
            BucketUnit::Month => sub_months(end, steps as u32),
        }
    }
}

fn sub_months(moment: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    moment
        .checked_sub_months(Months::new(months))
        .unwrap_or_else(|| moment - Duration::days(30 * months as i64))
}

/// Category selector for the trend chart. The `Active` predicate here is
/// deliberately looser than the status-derivation rule: see the trend
/// service for the distinction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrendCategory {
    Overall,
    Active,
    Terminated,
    #[serde(rename = "Not Interested")]
    NotInterested,
    Email,
    Web,
    WhatsApp,
    Social,
}

impl TrendCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendCategory::Overall => "Overall",
            TrendCategory::Active => "Active",
            TrendCategory::Terminated => "Terminated",
            TrendCategory::NotInterested => "Not Interested",
            TrendCategory::Email => "Email",
            TrendCategory::Web => "Web",
            TrendCategory::WhatsApp => "WhatsApp",
            TrendCategory::Social => "Social",
        }
    }
}

impl Default for TrendCategory {
    fn default() -> Self {
        TrendCategory::Overall
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}

/// Ordered time buckets for one chart request. Boundary `i` is the end of
/// bucket `i`; boundaries are strictly increasing and the last one equals
/// `range.end`.
#[derive(Debug, Clone, Serialize)]
pub struct TemporalBuckets {
    pub labels: Vec<String>,
    pub boundaries: Vec<DateTime<Utc>>,
    pub unit: BucketUnit,
    pub range: DateRange,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendSeries {
    pub label: String,
    pub points: Vec<u64>,
}

/// Chart-ready output: shared bucket labels plus the current-period series
/// and, in comparison mode, the prior-period overlay.
#[derive(Debug, Clone, Serialize)]
pub struct TrendChart {
    pub labels: Vec<String>,
    pub series: Vec<TrendSeries>,
}
