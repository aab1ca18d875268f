use serde_json::json;

use careops_analytics::financial_overview;
use careops_analytics::models::finance::{
    AdvisorySeverity, BudgetRecord, EmployeeRecord, ExpenseRecord,
};
use careops_analytics::models::inquiry::InquiryRecord;

fn record(value: serde_json::Value) -> InquiryRecord {
    serde_json::from_value(value).expect("record")
}

fn expense(value: serde_json::Value) -> ExpenseRecord {
    serde_json::from_value(value).expect("expense")
}

#[test]
fn healthy_books_produce_a_single_info_advisory() {
    let records = vec![record(json!({
        "shift_status": "Confirmed",
        "amount": 100000.0,
        "date": "2025-03-10",
    }))];
    let expenses = vec![expense(json!({
        "expense_date": "2025-03-12",
        "category": "Transport",
        "amount": 40000.0,
    }))];
    let budgets = vec![BudgetRecord {
        category: Some("Transport".to_string()),
        budget_amount: Some(50000.0),
        ..BudgetRecord::default()
    }];

    let overview = financial_overview(&records, &expenses, &[], &budgets);
    assert_eq!(overview.revenue, 100000.0);
    assert_eq!(overview.expenses, 40000.0);
    assert_eq!(overview.net_earnings, 60000.0);
    assert_eq!(overview.total_budget, 50000.0);
    // Exactly 80 percent is not yet "approaching the limit".
    assert_eq!(overview.budget_utilization, 80);
    assert_eq!(overview.advisories.len(), 1);
    assert_eq!(overview.advisories[0].severity, AdvisorySeverity::Info);
    assert!(overview.advisories[0].message.contains("Transport"));
}

#[test]
fn utilization_exactly_hundred_cautions_without_escalating() {
    let records = vec![record(json!({
        "shift_status": "Confirmed",
        "amount": 100000.0,
    }))];
    let expenses = vec![expense(json!({
        "expense_date": "2025-03-12",
        "category": "Transport",
        "amount": 50000.0,
    }))];
    let budgets = vec![BudgetRecord {
        category: Some("Transport".to_string()),
        budget_amount: Some(50000.0),
        ..BudgetRecord::default()
    }];

    let overview = financial_overview(&records, &expenses, &[], &budgets);
    // The budget is fully consumed but not yet exceeded.
    assert_eq!(overview.budget_utilization, 100);
    assert!(overview
        .advisories
        .iter()
        .any(|advisory| advisory.severity == AdvisorySeverity::Caution));
    assert!(!overview
        .advisories
        .iter()
        .any(|advisory| advisory.severity == AdvisorySeverity::Critical));
}

#[test]
fn struggling_books_stack_every_matching_advisory() {
    let records = vec![record(json!({
        "shift_status": "Confirmed",
        "amount": 20000.0,
    }))];
    let expenses = vec![
        expense(json!({ "category": "Supplies", "amount": 15000.0 })),
        expense(json!({ "category": "Transport", "amount": 10000.0 })),
    ];
    let budgets = vec![BudgetRecord {
        category: Some("Operations".to_string()),
        budget_amount: Some(20000.0),
        ..BudgetRecord::default()
    }];

    let overview = financial_overview(&records, &expenses, &[], &budgets);
    assert_eq!(overview.budget_utilization, 125);
    assert!(overview.net_earnings < 0.0);

    let severities: Vec<AdvisorySeverity> = overview
        .advisories
        .iter()
        .map(|advisory| advisory.severity)
        .collect();
    assert!(severities.contains(&AdvisorySeverity::Critical));
    assert_eq!(
        severities
            .iter()
            .filter(|s| **s == AdvisorySeverity::Warning)
            .count(),
        2
    );
    assert!(severities.contains(&AdvisorySeverity::Info));
    assert!(!severities.contains(&AdvisorySeverity::Caution));

    let top = overview
        .advisories
        .iter()
        .find(|advisory| advisory.severity == AdvisorySeverity::Info)
        .expect("top category advisory");
    assert!(top.message.contains("Supplies"));
}

#[test]
fn payroll_reduces_gross_but_not_net() {
    let records = vec![
        record(json!({ "shift_status": "Confirmed", "amount": 60000.0 })),
        record(json!({ "service_status": "Active", "rate_agreed": 30000.0 })),
    ];
    let employees = vec![
        EmployeeRecord {
            name: Some("Asha".to_string()),
            earnings_per_month: Some(18000.0),
            ..EmployeeRecord::default()
        },
        EmployeeRecord {
            name: Some("Binu".to_string()),
            earnings_per_month: Some(15000.0),
            ..EmployeeRecord::default()
        },
    ];
    let expenses = vec![expense(json!({ "category": "Rent", "amount": 12000.0 }))];

    let overview = financial_overview(&records, &expenses, &employees, &[]);
    assert_eq!(overview.revenue, 90000.0);
    assert_eq!(overview.payroll, 33000.0);
    assert_eq!(overview.gross_earnings, 57000.0);
    assert_eq!(overview.net_earnings, 78000.0);
}

#[test]
fn custom_budget_lines_use_their_own_label() {
    let budgets = vec![BudgetRecord {
        category: Some("Other".to_string()),
        custom_category: Some("Training".to_string()),
        budget_amount: Some(8000.0),
        ..BudgetRecord::default()
    }];
    let expenses = vec![expense(json!({ "category": "Training", "amount": 2000.0 }))];

    let overview = financial_overview(&[], &expenses, &[], &budgets);
    assert_eq!(overview.budget_vs_actual.len(), 1);
    assert_eq!(overview.budget_vs_actual[0].category, "Training");
    assert_eq!(overview.budget_vs_actual[0].actual, 2000.0);
    assert_eq!(overview.budget_vs_actual[0].pct, 25);
}

#[test]
fn monthly_flow_collapses_years_onto_a_seasonal_axis() {
    let records = vec![
        record(json!({ "shift_status": "Confirmed", "amount": 500.0, "date": "2024-03-01" })),
        record(json!({ "shift_status": "Confirmed", "amount": 700.0, "date": "2025-03-15" })),
    ];
    let expenses = vec![expense(json!({
        "expense_date": "2025-07-04",
        "category": "Supplies",
        "amount": 90.0,
    }))];

    let overview = financial_overview(&records, &expenses, &[], &[]);
    assert_eq!(overview.monthly_flow.len(), 12);
    assert_eq!(overview.monthly_flow[2].label, "Mar");
    assert_eq!(overview.monthly_flow[2].revenue, 1200.0);
    assert_eq!(overview.monthly_flow[6].expenses, 90.0);
}

#[test]
fn string_amounts_from_upstream_still_count() {
    let records = vec![record(json!({
        "shift_status": "Confirmed",
        "amount": "2500",
    }))];
    let expenses = vec![expense(json!({ "category": "Misc", "amount": "400" }))];

    let overview = financial_overview(&records, &expenses, &[], &[]);
    assert_eq!(overview.revenue, 2500.0);
    assert_eq!(overview.expenses, 400.0);
    assert_eq!(overview.net_earnings, 2100.0);
}
