use super::*;
use crate::net::types::ReportSummary;

fn row(name: &str, project: &str, allocation: f64, amount: f64, utilization: &str) -> ReportRow {
    ReportRow {
        employee_id: 1,
        employee_name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        primary_skills: "Rust, SQL".to_owned(),
        project_name: project.to_owned(),
        client_name: "Acme".to_owned(),
        allocation_percentage: allocation,
        monthly_hours: 160.0 * allocation / 100.0,
        billable_hours: 100.0,
        monthly_amount: amount,
        utilization: utilization.to_owned(),
        ..ReportRow::default()
    }
}

fn rows() -> Vec<ReportRow> {
    vec![
        row("Chen", "Atlas", 50.0, 1000.0, "Under-utilized"),
        row("asha", "Borealis", 100.0, 3000.0, "Optimal"),
        row("Ben", "Atlas", 120.0, 2000.0, "Over-allocated"),
    ]
}

fn names(rows: &[&ReportRow]) -> Vec<String> {
    rows.iter().map(|r| r.employee_name.clone()).collect()
}

// =============================================================
// Query
// =============================================================

#[test]
fn query_wire_values() {
    assert_eq!(ReportType::Internal.as_str(), "internal");
    assert_eq!(ReportType::parse("REQUISITION"), Some(ReportType::Requisition));
    assert_eq!(ReportLevel::Project.as_str(), "project");
    assert_eq!(ReportLevel::parse("nope"), None);
}

#[test]
fn project_level_requires_project() {
    let mut query = ReportQuery { level: ReportLevel::Project, ..ReportQuery::default() };
    assert!(query.validate().contains("project_id"));
    query.project_id = Some(7);
    assert!(query.validate().is_empty());
}

#[test]
fn inverted_period_is_rejected() {
    let query = ReportQuery {
        start_date: Some("2026-03-01".to_owned()),
        end_date: Some("2026-02-01".to_owned()),
        ..ReportQuery::default()
    };
    assert_eq!(query.validate().get("end_date"), Some("End date must be on or after start date"));
}

#[test]
fn malformed_period_date_is_rejected() {
    let query = ReportQuery { start_date: Some("March".to_owned()), ..ReportQuery::default() };
    assert_eq!(query.validate().get("start_date"), Some("Enter a valid date"));
}

// =============================================================
// Utilization bands
// =============================================================

#[test]
fn classify_uses_report_bands() {
    assert_eq!(UtilizationStatus::classify(79.9), UtilizationStatus::UnderUtilized);
    assert_eq!(UtilizationStatus::classify(80.0), UtilizationStatus::Optimal);
    assert_eq!(UtilizationStatus::classify(100.0), UtilizationStatus::Optimal);
    assert_eq!(UtilizationStatus::classify(100.5), UtilizationStatus::OverAllocated);
}

#[test]
fn row_status_falls_back_to_percentage() {
    let blank = row("X", "P", 120.0, 0.0, "");
    assert_eq!(UtilizationStatus::of(&blank), UtilizationStatus::OverAllocated);
}

// =============================================================
// Sort & filter
// =============================================================

#[test]
fn default_sort_is_name_ascending_case_insensitive() {
    let data = rows();
    let view = ReportView::default();
    assert_eq!(names(&view.visible(&data)), vec!["asha", "Ben", "Chen"]);
}

#[test]
fn toggle_sort_flips_then_resets() {
    let mut view = ReportView::default();
    view.toggle_sort(SortColumn::EmployeeName);
    assert_eq!(view.direction, SortDirection::Desc);
    view.toggle_sort(SortColumn::MonthlyAmount);
    assert_eq!(view.sort_by, SortColumn::MonthlyAmount);
    assert_eq!(view.direction, SortDirection::Asc);

    let data = rows();
    assert_eq!(names(&view.visible(&data)), vec!["Chen", "Ben", "asha"]);
    view.toggle_sort(SortColumn::MonthlyAmount);
    assert_eq!(names(&view.visible(&data)), vec!["asha", "Ben", "Chen"]);
}

#[test]
fn every_column_sorts_without_panicking() {
    let data = rows();
    for column in SortColumn::ALL {
        let view = ReportView { sort_by: column, ..ReportView::default() };
        assert_eq!(view.visible(&data).len(), 3, "{column:?}");
    }
}

#[test]
fn text_filter_matches_name_email_project_and_skills() {
    let data = rows();
    let mut view = ReportView { search: "atlas".to_owned(), ..ReportView::default() };
    assert_eq!(names(&view.visible(&data)), vec!["Ben", "Chen"]);

    view.search = "ASHA@".to_owned();
    assert_eq!(names(&view.visible(&data)), vec!["asha"]);

    view.search = "sql".to_owned();
    assert_eq!(view.visible(&data).len(), 3);

    view.search = "kotlin".to_owned();
    assert!(view.visible(&data).is_empty());
}

#[test]
fn utilization_filter_combines_with_text() {
    let data = rows();
    let view = ReportView {
        search: "atlas".to_owned(),
        utilization: Some(UtilizationStatus::OverAllocated),
        ..ReportView::default()
    };
    assert_eq!(names(&view.visible(&data)), vec!["Ben"]);
}

#[test]
fn totals_cover_visible_rows_only() {
    let data = rows();
    let view = ReportView { search: "atlas".to_owned(), ..ReportView::default() };
    let visible = view.visible(&data);
    let totals = ReportView::totals(&visible);
    assert_eq!(totals.rows, 2);
    assert!((totals.monthly_amount - 3000.0).abs() < 1e-9);
    assert!((totals.billable_hours - 200.0).abs() < 1e-9);
    assert!((totals.monthly_hours - 272.0).abs() < 1e-9);
}

// =============================================================
// Page state
// =============================================================

#[test]
fn invalid_query_is_not_sent() {
    let mut state = ReportState::default();
    state.query.level = ReportLevel::Project;
    assert!(state.begin_fetch().is_none());
    assert!(!state.loading);
    assert!(state.errors.contains("project_id"));
}

#[test]
fn stale_report_is_dropped() {
    let mut state = ReportState::default();
    let (first, _) = state.begin_fetch().unwrap();
    let (second, _) = state.begin_fetch().unwrap();

    let report = AllocationReport { resources: rows(), summary: ReportSummary::default(), ..AllocationReport::default() };
    assert!(!state.finish_fetch(first, Ok(report.clone())));
    assert!(state.report.is_none());
    assert!(state.loading);

    assert!(state.finish_fetch(second, Ok(report)));
    assert!(!state.loading);
    assert_eq!(state.report.as_ref().map(|r| r.resources.len()), Some(3));
}

#[test]
fn failed_report_keeps_previous_snapshot() {
    let mut state = ReportState::default();
    let (seq, _) = state.begin_fetch().unwrap();
    state.finish_fetch(seq, Ok(AllocationReport::default()));
    let (seq, _) = state.begin_fetch().unwrap();
    state.finish_fetch(seq, Err(ApiError::Server { status: 500, message: None }));
    assert!(state.report.is_some());
    assert_eq!(state.error.as_deref(), Some("Request failed (status 500)"));
}
