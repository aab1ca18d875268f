use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::finance::{BudgetRecord, EmployeeRecord, ExpenseRecord};
use crate::models::inquiry::{InquiryRecord, InterestLevel, ServiceStatus};
use crate::models::kpi::{ActivityEntry, DashboardKpis, DashboardSummary, Segment};
use crate::services::finance_service::financial_overview;
use crate::utils::dates::{month_key, previous_month_key};

const WEB_LEAD_KEYWORDS: &[&str] = &["google", "social", "facebook", "instagram", "web"];
const LEAD_CHANNEL_KEYWORDS: &[&str] =
    &["web", "google", "social", "facebook", "instagram", "whatsapp"];

/// Full dashboard roll-up over the fetched collections. Pure and
/// synchronous; `now` anchors the calendar-month comparisons.
pub fn summarize(
    records: &[InquiryRecord],
    expenses: &[ExpenseRecord],
    employees: &[EmployeeRecord],
    budgets: &[BudgetRecord],
    now: DateTime<Utc>,
) -> DashboardSummary {
    DashboardSummary {
        kpis: compute_kpis(records, now),
        finance: financial_overview(records, expenses, employees, budgets),
    }
}

/// Records counted as active for KPI purposes: stored `Active`, or
/// confirmed with payment made. Looser than derivation rule 3 by design.
fn counts_as_active(record: &InquiryRecord) -> bool {
    matches!(record.stored_status(), Some(ServiceStatus::Active))
        || (record.confirmed() && record.payment_made)
}

fn counts_as_payment_pending(record: &InquiryRecord) -> bool {
    matches!(record.stored_status(), Some(ServiceStatus::PaymentPending))
        || (record.confirmed() && !record.payment_made)
}

pub fn compute_kpis(records: &[InquiryRecord], now: DateTime<Utc>) -> DashboardKpis {
    let current = month_key(&now);
    let previous = previous_month_key(&now);

    let mut kpis = DashboardKpis {
        total: records.len() as u64,
        ..DashboardKpis::default()
    };

    for record in records {
        let stored = record.stored_status();

        if counts_as_active(record) {
            kpis.active += 1;
        }
        if matches!(stored, Some(ServiceStatus::Pending)) {
            kpis.pending += 1;
        }
        if counts_as_payment_pending(record) {
            kpis.payment_pending += 1;
        }
        if matches!(stored, Some(ServiceStatus::Terminated)) {
            kpis.terminated += 1;
        }
        if record.source_matches(WEB_LEAD_KEYWORDS) {
            kpis.web_leads += 1;
        }
        if record.invoice_issued() {
            kpis.invoices_issued += 1;
        }
        if matches!(
            record.interest_level,
            InterestLevel::High | InterestLevel::Medium
        ) && matches!(
            stored,
            Some(ServiceStatus::Pending | ServiceStatus::PendingAction)
        ) {
            kpis.potential_clients += 1;
        }
        if matches!(stored, Some(ServiceStatus::NotInterested)) {
            kpis.rejected += 1;
        }

        if let Some(entry) = record.entry_date() {
            let key = month_key(&entry);
            if key == current {
                kpis.this_month += 1;
            } else if key == previous {
                kpis.last_month += 1;
            }
        }
    }

    if kpis.total > 0 {
        kpis.active_pct =
            ((kpis.active as f64 / kpis.total as f64) * 100.0).round() as u64;
    }

    debug!(
        target: "careops::kpi",
        total = kpis.total,
        active = kpis.active,
        "computed dashboard kpis"
    );

    kpis
}

/// Latest records first, formatted for the activity feed.
pub fn recent_activity(
    records: &[InquiryRecord],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<ActivityEntry> {
    let mut dated: Vec<(&InquiryRecord, Option<DateTime<Utc>>)> = records
        .iter()
        .map(|record| (record, record.trend_date()))
        .collect();
    // Undated records sink to the end.
    dated.sort_by(|a, b| b.1.cmp(&a.1));

    dated
        .into_iter()
        .take(limit)
        .map(|(record, date)| ActivityEntry {
            id: record.id.clone(),
            customer_name: record
                .customer_name
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string()),
            status_label: record
                .stored_status()
                .map(|status| status.as_str().to_string())
                .unwrap_or_else(|| "New Inquiry".to_string()),
            location: record
                .customer_location
                .clone()
                .unwrap_or_else(|| "General".to_string()),
            time_ago: date
                .map(|then| format_time_ago(then, now))
                .unwrap_or_else(|| "unknown".to_string()),
        })
        .collect()
}

/// Coarse relative timestamp for the activity feed.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    let seconds = elapsed.num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}

/// Explorer views over the record collection, one predicate per segment.
pub fn filter_segment<'a>(records: &'a [InquiryRecord], segment: Segment) -> Vec<&'a InquiryRecord> {
    records
        .iter()
        .filter(|record| segment_matches(segment, record))
        .collect()
}

fn segment_matches(segment: Segment, record: &InquiryRecord) -> bool {
    let stored = record.stored_status();
    match segment {
        Segment::DirectInquiries => !record.source_matches(LEAD_CHANNEL_KEYWORDS),
        Segment::ActiveService => counts_as_active(record),
        Segment::InvoiceGenerated => record.invoice_issued(),
        Segment::PendingAction => {
            matches!(
                stored,
                Some(
                    ServiceStatus::Pending
                        | ServiceStatus::StaffIssue
                        | ServiceStatus::PaymentPending
                )
            ) || (matches!(stored, Some(ServiceStatus::Active)) && !record.staff_assigned())
                || (record.confirmed() && !record.payment_made)
        }
        Segment::Terminated => matches!(
            stored,
            Some(ServiceStatus::Terminated | ServiceStatus::NotInterested)
        ),
    }
}
