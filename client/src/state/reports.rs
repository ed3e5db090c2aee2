//! Allocation report query and client-side sort/filter view.
//!
//! DESIGN
//! ======
//! The backend computes the report once per query; every sort and filter
//! afterwards runs over that snapshot without another request. Totals shown
//! under the table cover only the rows that survive the filter.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use std::cmp::Ordering;

use crate::net::error::ApiError;
use crate::net::types::{AllocationReport, ReportRow};
use crate::util::dates::{ends_before_start, parse_iso_date};
use crate::util::validation::FieldErrors;

// =============================================================================
// QUERY
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportType {
    /// Cost view using internal allocation percentages.
    #[default]
    Internal,
    /// Client view using requisition (billable) percentages.
    Requisition,
}

impl ReportType {
    pub const ALL: [Self; 2] = [Self::Internal, Self::Requisition];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Requisition => "requisition",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::Requisition => "Requisition",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportLevel {
    #[default]
    Overall,
    Project,
}

impl ReportLevel {
    pub const ALL: [Self; 2] = [Self::Overall, Self::Project];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Project => "project",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Overall => "All projects",
            Self::Project => "Single project",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Parameters of one report generation request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub report_type: ReportType,
    pub level: ReportLevel,
    pub project_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ReportQuery {
    /// Project-level reports need a project; the period must not be inverted.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.level == ReportLevel::Project && self.project_id.is_none() {
            errors.insert("project_id", "Select a project for a project-level report");
        }
        for (key, value) in [("start_date", &self.start_date), ("end_date", &self.end_date)] {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                if parse_iso_date(value).is_none() {
                    errors.insert(key, "Enter a valid date");
                }
            }
        }
        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            if ends_before_start(start, end) {
                errors.insert("end_date", "End date must be on or after start date");
            }
        }
        errors
    }
}

// =============================================================================
// SORT & FILTER
// =============================================================================

/// Utilization classification carried on each report row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UtilizationStatus {
    UnderUtilized,
    Optimal,
    OverAllocated,
}

impl UtilizationStatus {
    pub const ALL: [Self; 3] = [Self::UnderUtilized, Self::Optimal, Self::OverAllocated];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UnderUtilized => "Under-utilized",
            Self::Optimal => "Optimal",
            Self::OverAllocated => "Over-allocated",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label().eq_ignore_ascii_case(raw.trim()))
    }

    /// Band an allocation percentage: below 80 under, up to 100 optimal.
    #[must_use]
    pub fn classify(percentage: f64) -> Self {
        if percentage < 80.0 {
            Self::UnderUtilized
        } else if percentage <= 100.0 {
            Self::Optimal
        } else {
            Self::OverAllocated
        }
    }

    /// Row status as reported, falling back to the row's allocation.
    #[must_use]
    pub fn of(row: &ReportRow) -> Self {
        Self::parse(&row.utilization).unwrap_or_else(|| Self::classify(row.allocation_percentage))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    EmployeeName,
    Email,
    Role,
    ProjectName,
    ClientName,
    StartDate,
    EndDate,
    AllocationPercentage,
    BillablePercentage,
    MonthlyHours,
    BillableHours,
    HourlyRate,
    MonthlyAmount,
    Utilization,
}

impl SortColumn {
    pub const ALL: [Self; 14] = [
        Self::EmployeeName,
        Self::Email,
        Self::Role,
        Self::ProjectName,
        Self::ClientName,
        Self::StartDate,
        Self::EndDate,
        Self::AllocationPercentage,
        Self::BillablePercentage,
        Self::MonthlyHours,
        Self::BillableHours,
        Self::HourlyRate,
        Self::MonthlyAmount,
        Self::Utilization,
    ];

    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Self::EmployeeName => "Employee",
            Self::Email => "Email",
            Self::Role => "Role",
            Self::ProjectName => "Project",
            Self::ClientName => "Client",
            Self::StartDate => "Start",
            Self::EndDate => "End",
            Self::AllocationPercentage => "Allocation %",
            Self::BillablePercentage => "Billable %",
            Self::MonthlyHours => "Hours",
            Self::BillableHours => "Billable hrs",
            Self::HourlyRate => "Rate",
            Self::MonthlyAmount => "Amount",
            Self::Utilization => "Utilization",
        }
    }

    fn compare(self, a: &ReportRow, b: &ReportRow) -> Ordering {
        let text = |x: &str, y: &str| x.to_lowercase().cmp(&y.to_lowercase());
        match self {
            Self::EmployeeName => text(&a.employee_name, &b.employee_name),
            Self::Email => text(&a.email, &b.email),
            Self::Role => text(a.role.as_deref().unwrap_or_default(), b.role.as_deref().unwrap_or_default()),
            Self::ProjectName => text(&a.project_name, &b.project_name),
            Self::ClientName => text(&a.client_name, &b.client_name),
            Self::StartDate => a.start_date.cmp(&b.start_date),
            Self::EndDate => a.end_date.cmp(&b.end_date),
            Self::AllocationPercentage => a.allocation_percentage.total_cmp(&b.allocation_percentage),
            Self::BillablePercentage => a.billable_percentage.total_cmp(&b.billable_percentage),
            Self::MonthlyHours => a.monthly_hours.total_cmp(&b.monthly_hours),
            Self::BillableHours => a.billable_hours.total_cmp(&b.billable_hours),
            Self::HourlyRate => a.hourly_rate.total_cmp(&b.hourly_rate),
            Self::MonthlyAmount => a.monthly_amount.total_cmp(&b.monthly_amount),
            Self::Utilization => UtilizationStatus::of(a).label().cmp(UtilizationStatus::of(b).label()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Sums over the rows currently visible in the table.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibleTotals {
    pub rows: usize,
    pub monthly_hours: f64,
    pub billable_hours: f64,
    pub monthly_amount: f64,
}

/// Sort and filter settings applied to a report snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportView {
    pub sort_by: SortColumn,
    pub direction: SortDirection,
    pub search: String,
    pub utilization: Option<UtilizationStatus>,
}

impl ReportView {
    /// Clicking the active column flips direction; a new column sorts ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_by == column {
            self.direction = self.direction.flipped();
        } else {
            self.sort_by = column;
            self.direction = SortDirection::Asc;
        }
    }

    fn matches(&self, row: &ReportRow) -> bool {
        if let Some(wanted) = self.utilization {
            if UtilizationStatus::of(row) != wanted {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&row.employee_name, &row.email, &row.project_name, &row.primary_skills]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filtered rows in display order. The sort is stable.
    #[must_use]
    pub fn visible<'a>(&self, rows: &'a [ReportRow]) -> Vec<&'a ReportRow> {
        let mut visible: Vec<&ReportRow> = rows.iter().filter(|row| self.matches(row)).collect();
        visible.sort_by(|a, b| {
            let ordering = self.sort_by.compare(a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        visible
    }

    #[must_use]
    pub fn totals(rows: &[&ReportRow]) -> VisibleTotals {
        rows.iter().fold(VisibleTotals::default(), |acc, row| VisibleTotals {
            rows: acc.rows + 1,
            monthly_hours: acc.monthly_hours + row.monthly_hours,
            billable_hours: acc.billable_hours + row.billable_hours,
            monthly_amount: acc.monthly_amount + row.monthly_amount,
        })
    }
}

// =============================================================================
// PAGE STATE
// =============================================================================

/// Report page state: query form, latest snapshot, and view settings.
#[derive(Clone, Debug, Default)]
pub struct ReportState {
    pub query: ReportQuery,
    pub view: ReportView,
    pub report: Option<AllocationReport>,
    pub errors: FieldErrors,
    pub loading: bool,
    pub error: Option<String>,
    request_seq: u64,
}

impl ReportState {
    /// Validate the query and stamp a new request.
    ///
    /// Returns the sequence number and query to send, or `None` when the
    /// query is invalid (errors are recorded).
    pub fn begin_fetch(&mut self) -> Option<(u64, ReportQuery)> {
        self.errors = self.query.validate();
        if !self.errors.is_empty() {
            return None;
        }
        self.request_seq += 1;
        self.loading = true;
        self.error = None;
        Some((self.request_seq, self.query.clone()))
    }

    /// Apply a response; results of superseded requests are dropped.
    ///
    /// Returns `false` when the response was stale.
    pub fn finish_fetch(&mut self, seq: u64, result: Result<AllocationReport, ApiError>) -> bool {
        if seq != self.request_seq {
            return false;
        }
        self.loading = false;
        match result {
            Ok(report) => {
                self.report = Some(report);
                self.error = None;
            }
            Err(err) => self.error = Some(err.user_message()),
        }
        true
    }
}
