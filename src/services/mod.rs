pub mod finance_service;
pub mod kpi_service;
pub mod report_service;
pub mod status_service;
pub mod trend_service;
