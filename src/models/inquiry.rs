use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::de;
use crate::utils::dates::parse_datetime;

/// Confirmation state of the requested shift. Free text upstream;
/// normalized once at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ShiftStatus {
    Pending,
    Confirmed,
    Other(String),
}

impl ShiftStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ShiftStatus::Pending => "Pending",
            ShiftStatus::Confirmed => "Confirmed",
            ShiftStatus::Other(raw) => raw,
        }
    }
}

impl Default for ShiftStatus {
    fn default() -> Self {
        ShiftStatus::Pending
    }
}

impl From<String> for ShiftStatus {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("pending") {
            ShiftStatus::Pending
        } else if trimmed.eq_ignore_ascii_case("confirmed") {
            ShiftStatus::Confirmed
        } else {
            ShiftStatus::Other(trimmed.to_string())
        }
    }
}

impl Serialize for ShiftStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum InterestLevel {
    Low,
    Medium,
    High,
}

impl InterestLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestLevel::Low => "Low",
            InterestLevel::Medium => "Medium",
            InterestLevel::High => "High",
        }
    }
}

impl Default for InterestLevel {
    fn default() -> Self {
        InterestLevel::Low
    }
}

impl From<String> for InterestLevel {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("high") {
            InterestLevel::High
        } else if trimmed.eq_ignore_ascii_case("medium") {
            InterestLevel::Medium
        } else {
            InterestLevel::Low
        }
    }
}

impl Serialize for InterestLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Lifecycle value the operators write into the record. Distinct from the
/// derived status: this is a stored signal, not the computed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Active,
    Pending,
    PendingAction,
    PaymentPending,
    FollowUp,
    StaffIssue,
    PendingAllocation,
    NotInterested,
    Terminated,
    TerminatedService,
    Cancelled,
    Other(String),
}

impl ServiceStatus {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "active" => ServiceStatus::Active,
            "pending" => ServiceStatus::Pending,
            "pending action" => ServiceStatus::PendingAction,
            "payment pending" => ServiceStatus::PaymentPending,
            "follow-up" | "follow up" => ServiceStatus::FollowUp,
            "staff issue" => ServiceStatus::StaffIssue,
            "pending allocation" => ServiceStatus::PendingAllocation,
            "not interested" => ServiceStatus::NotInterested,
            "terminated" => ServiceStatus::Terminated,
            "terminated service" => ServiceStatus::TerminatedService,
            "cancelled" | "canceled" => ServiceStatus::Cancelled,
            _ => ServiceStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ServiceStatus::Active => "Active",
            ServiceStatus::Pending => "Pending",
            ServiceStatus::PendingAction => "Pending Action",
            ServiceStatus::PaymentPending => "Payment Pending",
            ServiceStatus::FollowUp => "Follow-up",
            ServiceStatus::StaffIssue => "Staff Issue",
            ServiceStatus::PendingAllocation => "Pending Allocation",
            ServiceStatus::NotInterested => "Not Interested",
            ServiceStatus::Terminated => "Terminated",
            ServiceStatus::TerminatedService => "Terminated Service",
            ServiceStatus::Cancelled => "Cancelled",
            ServiceStatus::Other(raw) => raw,
        }
    }
}

impl Serialize for ServiceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn service_status_field<'de, D>(deserializer: D) -> Result<Option<ServiceStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ServiceStatus::parse))
}

/// Lifecycle state computed from the record's raw signals. Never stored;
/// re-derived on every read so it cannot drift from the signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedStatus {
    TerminatedService,
    NotInterested,
    Active,
    PaymentPending,
    FollowUp,
    StaffIssue,
    PendingAllocation,
    // Passthrough-only variants: reachable via the stored-status fallback.
    Pending,
    PendingAction,
    Cancelled,
    Other(String),
}

impl DerivedStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DerivedStatus::TerminatedService => "Terminated Service",
            DerivedStatus::NotInterested => "Not Interested",
            DerivedStatus::Active => "Active",
            DerivedStatus::PaymentPending => "Payment Pending",
            DerivedStatus::FollowUp => "Follow-up",
            DerivedStatus::StaffIssue => "Staff Issue",
            DerivedStatus::PendingAllocation => "Pending Allocation",
            DerivedStatus::Pending => "Pending",
            DerivedStatus::PendingAction => "Pending Action",
            DerivedStatus::Cancelled => "Cancelled",
            DerivedStatus::Other(raw) => raw,
        }
    }
}

impl From<&ServiceStatus> for DerivedStatus {
    fn from(stored: &ServiceStatus) -> Self {
        match stored {
            ServiceStatus::Active => DerivedStatus::Active,
            ServiceStatus::Pending => DerivedStatus::Pending,
            ServiceStatus::PendingAction => DerivedStatus::PendingAction,
            ServiceStatus::PaymentPending => DerivedStatus::PaymentPending,
            ServiceStatus::FollowUp => DerivedStatus::FollowUp,
            ServiceStatus::StaffIssue => DerivedStatus::StaffIssue,
            ServiceStatus::PendingAllocation => DerivedStatus::PendingAllocation,
            ServiceStatus::NotInterested => DerivedStatus::NotInterested,
            ServiceStatus::Terminated | ServiceStatus::TerminatedService => {
                DerivedStatus::TerminatedService
            }
            ServiceStatus::Cancelled => DerivedStatus::Cancelled,
            ServiceStatus::Other(raw) => DerivedStatus::Other(raw.clone()),
        }
    }
}

impl Serialize for DerivedStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One client engagement as delivered by the remote store. Every field is
/// optional on the wire; absent or malformed values degrade to defaults so
/// ingestion never fails on a partial record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub shift_status: ShiftStatus,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub payment_made: bool,
    #[serde(default, deserialize_with = "service_status_field")]
    pub service_status: Option<ServiceStatus>,
    #[serde(default)]
    pub interest_level: InterestLevel,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub nurse_name: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub primary_staff_name: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub secondary_staff_name: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_amount")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::flexible_amount")]
    pub rate_agreed: Option<f64>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub invoice_number: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub customer_mobile: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub customer_location: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub sub_location: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub plan: Option<String>,
}

impl InquiryRecord {
    pub fn confirmed(&self) -> bool {
        self.shift_status == ShiftStatus::Confirmed
    }

    pub fn stored_status(&self) -> Option<&ServiceStatus> {
        self.service_status.as_ref()
    }

    /// A staff member counts as assigned when either name field is non-blank.
    pub fn staff_assigned(&self) -> bool {
        self.nurse_name.is_some() || self.primary_staff_name.is_some()
    }

    pub fn invoice_issued(&self) -> bool {
        self.invoice_number.is_some()
    }

    /// Billable value: `amount` with `rate_agreed` as the fallback.
    pub fn billed_amount(&self) -> f64 {
        self.amount.or(self.rate_agreed).unwrap_or(0.0)
    }

    /// Date used on the trend axis: creation timestamp first, then the
    /// free-form call date.
    pub fn trend_date(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(parse_datetime)
            .or_else(|| self.date.as_deref().and_then(parse_datetime))
    }

    /// Date used for KPI month counting: call date first, then the creation
    /// timestamp. The two fallback orders differ on purpose.
    pub fn entry_date(&self) -> Option<DateTime<Utc>> {
        self.date
            .as_deref()
            .and_then(parse_datetime)
            .or_else(|| self.created_at.as_deref().and_then(parse_datetime))
    }

    /// Case-insensitive substring match of the lead source against a
    /// channel keyword set.
    pub fn source_matches(&self, keywords: &[&str]) -> bool {
        match self.source.as_deref() {
            Some(source) => {
                let lowered = source.to_lowercase();
                keywords.iter().any(|keyword| lowered.contains(keyword))
            }
            None => false,
        }
    }
}
