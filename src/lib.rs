//! Analytics core for a home-care agency operations dashboard: status
//! derivation, trend bucketing, KPI and financial roll-ups, and report
//! export over leniently-parsed service records.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use services::finance_service::financial_overview;
pub use services::kpi_service::{compute_kpis, filter_segment, recent_activity, summarize};
pub use services::report_service::{
    records_to_csv, render_markdown_report, write_report, ReportFormat,
};
pub use services::status_service::derive_status;
pub use services::trend_service::{
    aggregate, build_buckets, build_trend_series, comparison_range, filter_trend,
};
pub use utils::logger::init_logging;
