use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::inquiry::InquiryRecord;
use crate::models::kpi::DashboardSummary;
use crate::services::status_service::derive_status;

const REPORT_PREFIX: &str = "careops-report";

const CSV_HEADERS: [&str; 8] = [
    "Serial No",
    "Call Date",
    "Name",
    "Mobile",
    "Service Required",
    "Sub Service",
    "Status",
    "Rate Agreed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Markdown,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Export the record collection as CSV, one row per record with the
/// derived status label in the Status column.
pub fn records_to_csv(records: &[InquiryRecord]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for (index, record) in records.iter().enumerate() {
        let rate = record
            .rate_agreed
            .map(|rate| format!("{rate:.0}"))
            .unwrap_or_default();
        writer.write_record([
            (index + 1).to_string(),
            record.date.clone().unwrap_or_default(),
            record.customer_name.clone().unwrap_or_default(),
            record.customer_mobile.clone().unwrap_or_default(),
            record.service.clone().unwrap_or_default(),
            record.plan.clone().unwrap_or_default(),
            derive_status(record).as_str().to_string(),
            rate,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::other(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| AppError::other(err.to_string()))
}

pub fn render_markdown_report(summary: &DashboardSummary, generated_at: DateTime<Utc>) -> String {
    let kpis = &summary.kpis;
    let finance = &summary.finance;
    let mut content = String::new();

    content.push_str("# CareOps Operations Report\n\n");
    content.push_str(&format!("Generated: {}\n\n", generated_at.to_rfc3339()));

    content.push_str("## Dashboard Indicators\n");
    content.push_str(&format!(
        "- Total inquiries: {}\n- Active services: {} ({}%)\n- Pending: {}\n- Payment pending: {}\n- Terminated: {}\n- Web leads: {}\n- Invoices issued: {}\n- This month: {} (last month {})\n- Potential clients: {}\n- Not interested: {}\n\n",
        kpis.total,
        kpis.active,
        kpis.active_pct,
        kpis.pending,
        kpis.payment_pending,
        kpis.terminated,
        kpis.web_leads,
        kpis.invoices_issued,
        kpis.this_month,
        kpis.last_month,
        kpis.potential_clients,
        kpis.rejected,
    ));

    content.push_str("## Financial Overview\n");
    content.push_str(&format!(
        "- Revenue: ₹{:.0}\n- Expenses: ₹{:.0}\n- Payroll: ₹{:.0}\n- Gross earnings: ₹{:.0}\n- Net earnings: ₹{:.0}\n- Budget utilization: {}%\n\n",
        finance.revenue,
        finance.expenses,
        finance.payroll,
        finance.gross_earnings,
        finance.net_earnings,
        finance.budget_utilization,
    ));

    content.push_str("## Advisories\n");
    for advisory in &finance.advisories {
        content.push_str(&format!(
            "- [{:?}] {}\n",
            advisory.severity, advisory.message
        ));
    }
    content.push('\n');

    if !finance.budget_vs_actual.is_empty() {
        content.push_str("## Budget vs Actual\n");
        for row in &finance.budget_vs_actual {
            content.push_str(&format!(
                "- {}: ₹{:.0} of ₹{:.0} ({}%)\n",
                row.category, row.actual, row.budget, row.pct
            ));
        }
        content.push('\n');
    }

    content
}

/// Write a timestamped report file into `dir` and return its path.
pub fn write_report(
    dir: &Path,
    summary: &DashboardSummary,
    records: &[InquiryRecord],
    format: ReportFormat,
    now: DateTime<Utc>,
) -> AppResult<PathBuf> {
    if dir.as_os_str().is_empty() {
        return Err(AppError::validation("report directory path is empty"));
    }
    std::fs::create_dir_all(dir)?;

    let timestamp = now.format("%Y%m%dT%H%M%SZ");
    let filename = format!("{REPORT_PREFIX}-{}.{}", timestamp, format.file_extension());
    let path = dir.join(filename);

    match format {
        ReportFormat::Markdown => {
            std::fs::write(&path, render_markdown_report(summary, now))?;
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(summary)?;
            std::fs::write(&path, json)?;
        }
        ReportFormat::Csv => {
            std::fs::write(&path, records_to_csv(records)?)?;
        }
    }

    info!(
        target: "careops::report",
        path = %path.display(),
        format = format.file_extension(),
        "report written"
    );

    Ok(path)
}
