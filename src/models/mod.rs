pub(crate) mod de;
pub mod finance;
pub mod inquiry;
pub mod kpi;
pub mod trend;
