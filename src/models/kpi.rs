use serde::Serialize;

use crate::models::finance::FinancialOverview;

/// Headline counts shown on the dashboard cards.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardKpis {
    pub total: u64,
    pub active: u64,
    pub pending: u64,
    pub payment_pending: u64,
    pub terminated: u64,
    pub web_leads: u64,
    pub invoices_issued: u64,
    pub this_month: u64,
    pub last_month: u64,
    pub potential_clients: u64,
    pub rejected: u64,
    /// Share of active engagements over the whole book, rounded percent.
    pub active_pct: u64,
}

/// Full dashboard roll-up: headline counts plus the financial position.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub kpis: DashboardKpis,
    pub finance: FinancialOverview,
}

/// One row of the recent-activity feed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityEntry {
    pub id: String,
    pub customer_name: String,
    pub status_label: String,
    pub location: String,
    pub time_ago: String,
}

/// Record subsets backing the analytics explorer views.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Segment {
    /// Direct clients, excluding web and social leads.
    DirectInquiries,
    ActiveService,
    InvoiceGenerated,
    /// Records needing attention: unpaid, unstaffed, or stalled.
    PendingAction,
    /// Finalized records, terminated or not interested.
    Terminated,
}
