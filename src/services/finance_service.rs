use tracing::debug;

use crate::models::finance::{
    AdvisorySeverity, BudgetActual, BudgetRecord, EmployeeRecord, ExpenseRecord,
    FinancialAdvisory, FinancialOverview, MonthlyFlow,
};
use crate::models::inquiry::{InquiryRecord, ServiceStatus, ShiftStatus};
use crate::utils::dates::parse_datetime;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A record contributes revenue once the shift is confirmed or the stored
/// status already marks it active.
fn earns_revenue(record: &InquiryRecord) -> bool {
    matches!(record.shift_status, ShiftStatus::Confirmed)
        || matches!(record.stored_status(), Some(ServiceStatus::Active))
}

/// Financial roll-up across service records, expenses, payroll, and budgets.
pub fn financial_overview(
    records: &[InquiryRecord],
    expenses: &[ExpenseRecord],
    employees: &[EmployeeRecord],
    budgets: &[BudgetRecord],
) -> FinancialOverview {
    let revenue: f64 = records
        .iter()
        .filter(|record| earns_revenue(record))
        .map(InquiryRecord::billed_amount)
        .sum();
    let total_expenses: f64 = expenses.iter().map(ExpenseRecord::spent).sum();
    let payroll: f64 = employees.iter().map(EmployeeRecord::monthly_pay).sum();
    let total_budget: f64 = budgets.iter().map(BudgetRecord::limit).sum();

    let budget_utilization = if total_budget > 0.0 {
        ((total_expenses / total_budget) * 100.0).round() as i64
    } else {
        0
    };

    let overview = FinancialOverview {
        revenue,
        expenses: total_expenses,
        payroll,
        gross_earnings: revenue - payroll,
        net_earnings: revenue - total_expenses,
        total_budget,
        budget_utilization,
        advisories: build_advisories(revenue, total_expenses, budget_utilization, expenses),
        budget_vs_actual: budget_vs_actual(budgets, expenses),
        monthly_flow: monthly_flow(records, expenses),
    };

    debug!(
        target: "careops::kpi",
        revenue = overview.revenue,
        expenses = overview.expenses,
        utilization = overview.budget_utilization,
        "computed financial overview"
    );

    overview
}

/// Each condition is evaluated on its own, so one dataset can raise several
/// advisories at once. Thresholds are strict: utilization of exactly 80
/// raises nothing.
fn build_advisories(
    revenue: f64,
    expenses: f64,
    utilization: i64,
    expense_records: &[ExpenseRecord],
) -> Vec<FinancialAdvisory> {
    let mut advisories = Vec::new();

    if utilization > 100 {
        advisories.push(FinancialAdvisory {
            severity: AdvisorySeverity::Critical,
            message: format!("Budget overrun at {utilization}%. Immediate review needed."),
        });
    } else if utilization > 80 {
        advisories.push(FinancialAdvisory {
            severity: AdvisorySeverity::Caution,
            message: format!("Budget at {utilization}%. Approaching limit."),
        });
    }

    if revenue - expenses < 0.0 {
        advisories.push(FinancialAdvisory {
            severity: AdvisorySeverity::Warning,
            message: "Net earnings are negative. Expenses exceed revenue.".to_string(),
        });
    }

    if revenue > 0.0 && expenses > revenue * 0.7 {
        advisories.push(FinancialAdvisory {
            severity: AdvisorySeverity::Warning,
            message: "Expenses exceed 70% of revenue. Review spending.".to_string(),
        });
    }

    if let Some((category, amount)) = top_expense_category(expense_records) {
        advisories.push(FinancialAdvisory {
            severity: AdvisorySeverity::Info,
            message: format!("Largest spend category: {category} (₹{amount:.0})."),
        });
    }

    if revenue == 0.0 && expenses == 0.0 {
        advisories.push(FinancialAdvisory {
            severity: AdvisorySeverity::Info,
            message: "No financial activity recorded yet.".to_string(),
        });
    }

    if advisories.is_empty() {
        advisories.push(FinancialAdvisory {
            severity: AdvisorySeverity::Healthy,
            message: "Finances are on track.".to_string(),
        });
    }

    advisories
}

fn top_expense_category(expenses: &[ExpenseRecord]) -> Option<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for expense in expenses {
        let category = expense
            .category
            .clone()
            .unwrap_or_else(|| "Uncategorized".to_string());
        match totals.iter_mut().find(|(name, _)| *name == category) {
            Some((_, total)) => *total += expense.spent(),
            None => totals.push((category, expense.spent())),
        }
    }
    totals
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .filter(|(_, total)| *total > 0.0)
}

/// One row per budget line, paired with actual spend in that category.
fn budget_vs_actual(budgets: &[BudgetRecord], expenses: &[ExpenseRecord]) -> Vec<BudgetActual> {
    budgets
        .iter()
        .map(|budget| {
            let category = budget.effective_category();
            let actual: f64 = expenses
                .iter()
                .filter(|expense| {
                    expense.category.as_deref().map(str::trim).unwrap_or("")
                        .eq_ignore_ascii_case(&category)
                })
                .map(ExpenseRecord::spent)
                .sum();
            let limit = budget.limit();
            let pct = if limit > 0.0 {
                ((actual / limit) * 100.0).round() as i64
            } else {
                0
            };
            BudgetActual {
                category,
                budget: limit,
                actual,
                pct,
            }
        })
        .collect()
}

/// Calendar-month revenue and expense totals, January through December.
/// Years collapse together; the chart shows seasonality, not history.
fn monthly_flow(records: &[InquiryRecord], expenses: &[ExpenseRecord]) -> Vec<MonthlyFlow> {
    let mut revenue_by_month = [0.0f64; 12];
    let mut expenses_by_month = [0.0f64; 12];

    for record in records.iter().filter(|record| earns_revenue(record)) {
        if let Some(date) = record.entry_date() {
            let index = chrono::Datelike::month0(&date) as usize;
            revenue_by_month[index] += record.billed_amount();
        }
    }
    for expense in expenses {
        if let Some(date) = expense
            .expense_date
            .as_deref()
            .and_then(parse_datetime)
        {
            let index = chrono::Datelike::month0(&date) as usize;
            expenses_by_month[index] += expense.spent();
        }
    }

    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| MonthlyFlow {
            label: (*label).to_string(),
            revenue: revenue_by_month[index],
            expenses: expenses_by_month[index],
        })
        .collect()
}
