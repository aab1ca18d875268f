use serde::{Deserialize, Serialize};

use crate::models::de;

/// One logged expense, as delivered by the expense endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub expense_date: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_amount")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub name: Option<String>,
    /// "Office Staff" vs "Field Staff", free text upstream.
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub work_type: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_amount")]
    pub earnings_per_month: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetRecord {
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::trimmed_text")]
    pub custom_category: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_amount")]
    pub budget_amount: Option<f64>,
    #[serde(default)]
    pub fiscal_year: Option<i32>,
}

impl ExpenseRecord {
    pub fn spent(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

impl EmployeeRecord {
    pub fn monthly_pay(&self) -> f64 {
        self.earnings_per_month.unwrap_or(0.0)
    }
}

impl BudgetRecord {
    pub fn limit(&self) -> f64 {
        self.budget_amount.unwrap_or(0.0)
    }

    /// "Other" budget lines carry their label in `custom_category`.
    pub fn effective_category(&self) -> String {
        let base = self.category.as_deref().unwrap_or("").trim();
        if base.is_empty() || base.eq_ignore_ascii_case("other") {
            self.custom_category
                .clone()
                .unwrap_or_else(|| "Other".to_string())
        } else {
            base.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySeverity {
    Healthy,
    Info,
    Caution,
    Warning,
    Critical,
}

/// One rule-generated line of financial advice.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialAdvisory {
    pub severity: AdvisorySeverity,
    pub message: String,
}

/// Spend against budget for one category.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetActual {
    pub category: String,
    pub budget: f64,
    pub actual: f64,
    pub pct: i64,
}

/// Revenue vs expense totals for one calendar month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyFlow {
    pub label: String,
    pub revenue: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialOverview {
    pub revenue: f64,
    pub expenses: f64,
    pub payroll: f64,
    /// Revenue less payroll.
    pub gross_earnings: f64,
    /// Revenue less expenses.
    pub net_earnings: f64,
    pub total_budget: f64,
    /// Rounded percent of budget consumed; 0 when no budget is defined.
    pub budget_utilization: i64,
    pub advisories: Vec<FinancialAdvisory>,
    pub budget_vs_actual: Vec<BudgetActual>,
    pub monthly_flow: Vec<MonthlyFlow>,
}
