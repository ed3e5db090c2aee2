//! Shared REST DTOs for the console/backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON contracts. Optional and derived
//! fields are `#[serde(default)]` so older backend builds that omit them
//! still decode; percentages tolerate float encodings of whole numbers.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

/// Employee seniority band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleLevel {
    #[serde(rename = "JR", alias = "Jr")]
    Jr,
    #[serde(rename = "MID", alias = "Mid")]
    Mid,
    #[serde(rename = "SR", alias = "Sr")]
    Sr,
    #[serde(rename = "LEAD", alias = "Lead")]
    Lead,
    #[serde(rename = "PRINCIPAL", alias = "Principal")]
    Principal,
}

impl RoleLevel {
    pub const ALL: [Self; 5] = [Self::Jr, Self::Mid, Self::Sr, Self::Lead, Self::Principal];

    /// Query/wire value (`"JR"`, `"MID"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jr => "JR",
            Self::Mid => "MID",
            Self::Sr => "SR",
            Self::Lead => "LEAD",
            Self::Principal => "PRINCIPAL",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Jr => "Junior",
            Self::Mid => "Mid",
            Self::Sr => "Senior",
            Self::Lead => "Lead",
            Self::Principal => "Principal",
        }
    }

    /// Parse a wire or display value, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Bench/allocation lifecycle of an employee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    Bench,
    Allocated,
    NoticePeriod,
}

impl EmployeeStatus {
    pub const ALL: [Self; 3] = [Self::Bench, Self::Allocated, Self::NoticePeriod];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bench => "BENCH",
            Self::Allocated => "ALLOCATED",
            Self::NoticePeriod => "NOTICE_PERIOD",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bench => "Bench",
            Self::Allocated => "Allocated",
            Self::NoticePeriod => "Notice period",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Delivery status of a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Pipeline,
    Active,
    OnHold,
    Closed,
}

impl ProjectStatus {
    pub const ALL: [Self; 4] = [Self::Pipeline, Self::Active, Self::OnHold, Self::Closed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pipeline => "PIPELINE",
            Self::Active => "ACTIVE",
            Self::OnHold => "ON_HOLD",
            Self::Closed => "CLOSED",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pipeline => "Pipeline",
            Self::Active => "Active",
            Self::OnHold => "On hold",
            Self::Closed => "Closed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Category of an employee risk entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskType {
    NoticePeriod,
    CriticalRole,
    SinglePointFailure,
    SkillGap,
    Performance,
}

impl RiskType {
    pub const ALL: [Self; 5] =
        [Self::NoticePeriod, Self::CriticalRole, Self::SinglePointFailure, Self::SkillGap, Self::Performance];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoticePeriod => "NOTICE_PERIOD",
            Self::CriticalRole => "CRITICAL_ROLE",
            Self::SinglePointFailure => "SINGLE_POINT_FAILURE",
            Self::SkillGap => "SKILL_GAP",
            Self::Performance => "PERFORMANCE",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NoticePeriod => "Notice period",
            Self::CriticalRole => "Critical role",
            Self::SinglePointFailure => "Single point of failure",
            Self::SkillGap => "Skill gap",
            Self::Performance => "Performance",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Severity of an employee risk entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskSeverity {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

// =============================================================================
// EMPLOYEES
// =============================================================================

/// A skill attached to an employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub id: Option<i64>,
    pub skill_name: String,
    #[serde(default)]
    pub proficiency: u8,
    #[serde(default)]
    pub last_used: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Employee record as returned by the directory and detail endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role_level: Option<RoleLevel>,
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    #[serde(default)]
    pub ctc_monthly: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub base_location: Option<String>,
    #[serde(default)]
    pub visa_status: Option<String>,
    #[serde(default)]
    pub remote_pref: bool,
    #[serde(default)]
    pub joined_date: Option<String>,
    #[serde(default)]
    pub bio_summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub skills_count: usize,
    #[serde(default)]
    pub allocations_count: usize,
    /// Sum of active internal allocation percentages, when the backend reports it.
    #[serde(default)]
    pub current_allocation_percentage: Option<f64>,
}

impl Employee {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub count: usize,
}

/// Body for employee create/update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_level: RoleLevel,
    pub status: EmployeeStatus,
    pub ctc_monthly: f64,
    pub currency: String,
    pub base_location: Option<String>,
    pub remote_pref: bool,
    pub bio_summary: Option<String>,
}

/// Body for `POST /employees/{id}/skills`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillPayload {
    pub skill_name: String,
    pub proficiency: u8,
    pub last_used: Option<String>,
    pub is_verified: bool,
}

/// Body for `POST /employees/{id}/risks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskPayload {
    pub risk_type: RiskType,
    pub severity: RiskSeverity,
    pub description: String,
    pub project_id: Option<i64>,
    pub mitigation_plan: Option<String>,
    pub mitigation_owner_emp_id: Option<i64>,
    pub target_resolution_date: Option<String>,
}

// =============================================================================
// PROJECTS & ALLOCATIONS
// =============================================================================

/// Project header record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub budget_cap: Option<f64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub probability: Option<u8>,
    #[serde(default)]
    pub tech_stack: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Aggregate figures the backend attaches to a project detail view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    #[serde(default)]
    pub total_team_members: usize,
    #[serde(default)]
    pub budget_utilized: f64,
    #[serde(default)]
    pub budget_remaining: f64,
    #[serde(default)]
    pub avg_utilization: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
    pub project: Project,
    #[serde(default)]
    pub team: Vec<Allocation>,
    #[serde(default)]
    pub metrics: Option<ProjectMetrics>,
}

/// One role line of a project's team structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub role_name: String,
    pub required_count: u32,
    pub utilization_percentage: i32,
}

/// Employee-to-project assignment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(default)]
    pub id: Option<i64>,
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub role_name: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Client-facing allocation.
    #[serde(default = "full_percent", deserialize_with = "deserialize_percent")]
    pub allocation_percentage: i32,
    /// Cost-accounting allocation; this is what conflict checks sum.
    #[serde(default = "full_percent", deserialize_with = "deserialize_percent")]
    pub internal_allocation_percentage: i32,
    #[serde(default = "full_percent", deserialize_with = "deserialize_percent")]
    pub billable_percentage: i32,
    #[serde(default)]
    pub billing_rate: Option<f64>,
    #[serde(default)]
    pub is_trainee: bool,
    #[serde(default)]
    pub mentoring_primary_emp_id: Option<i64>,
}

/// Project header fields as submitted by the creation wizard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetailsPayload {
    pub client_name: String,
    pub project_name: String,
    pub project_type: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub status: ProjectStatus,
    pub probability: Option<u8>,
    pub budget_cap: f64,
    pub tech_stack: String,
    pub description: String,
}

/// Aggregate body for `POST /projects`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectPayload {
    pub project: ProjectDetailsPayload,
    pub team_structure: Vec<RoleRequirement>,
    pub allocations: Vec<Allocation>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectResponse {
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CreateProjectResponse {
    #[must_use]
    pub fn project_id(&self) -> Option<i64> {
        self.project.as_ref().map(|p| p.id).or(self.id)
    }
}

/// Body for `PUT /projects/{id}/team`: the full replacement allocation list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamUpdatePayload {
    pub allocations: Vec<Allocation>,
}

/// Body for `POST /allocations/validate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationCheckRequest {
    pub employee_id: i64,
    pub project_id: Option<i64>,
    pub internal_allocation_percentage: i32,
    pub start_date: String,
    pub end_date: Option<String>,
    pub exclude_allocation_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationCheckResponse {
    pub valid: bool,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

// =============================================================================
// AI SUGGESTIONS & TRAINING
// =============================================================================

/// Body for `POST /projects/suggest-team`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSuggestionRequest {
    pub project: ProjectDetailsPayload,
    pub team_structure: Vec<RoleRequirement>,
}

/// One candidate assignment proposed by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSuggestion {
    pub role_name: String,
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub allocation_percentage: Option<i32>,
    #[serde(default)]
    pub billable_percentage: Option<i32>,
    #[serde(default)]
    pub billing_rate: Option<f64>,
    #[serde(default)]
    pub is_trainee: bool,
    #[serde(default)]
    pub mentoring_primary_emp_id: Option<i64>,
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub rationale: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSuggestionResponse {
    #[serde(default)]
    pub suggestions: Vec<TeamSuggestion>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecommendation {
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecommendationResponse {
    #[serde(default)]
    pub recommendations: Vec<TrainingRecommendation>,
}

/// Body for `POST /training/gap-analysis`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGapRequest {
    pub employee_id: Option<i64>,
    pub project_id: Option<i64>,
    pub target_skills: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub required_level: u8,
    pub current_level: u8,
}

impl SkillGap {
    /// Levels missing to reach the requirement (zero when already met).
    #[must_use]
    pub fn shortfall(&self) -> u8 {
        self.required_level.saturating_sub(self.current_level)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub course: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGapResponse {
    #[serde(default)]
    pub gaps: Vec<SkillGap>,
    #[serde(default)]
    pub recommendations: Vec<CourseRecommendation>,
}

// =============================================================================
// DASHBOARDS & REPORTS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchBurn {
    #[serde(default)]
    pub bench_count: u32,
    #[serde(default)]
    pub total_monthly_cost: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationKpi {
    #[serde(default)]
    pub total_employees: u32,
    #[serde(default)]
    pub allocated: u32,
    #[serde(default)]
    pub on_bench: u32,
    #[serde(default)]
    pub utilization_rate: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectKpi {
    #[serde(default)]
    pub active: u32,
}

/// Response of `GET /kpi`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiResponse {
    #[serde(default)]
    pub bench_burn: BenchBurn,
    #[serde(default)]
    pub utilization: UtilizationKpi,
    #[serde(default)]
    pub projects: ProjectKpi,
}

/// One resource line of an allocation report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(default)]
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub primary_skills: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub allocation_percentage: f64,
    #[serde(default)]
    pub internal_allocation_percentage: Option<f64>,
    #[serde(default)]
    pub billable_percentage: f64,
    #[serde(default)]
    pub monthly_hours: f64,
    #[serde(default)]
    pub billable_hours: f64,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub monthly_amount: f64,
    /// `Under-utilized`, `Optimal`, or `Over-allocated`.
    #[serde(default)]
    pub utilization: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub total_resources: usize,
    #[serde(default)]
    pub total_monthly_hours: f64,
    #[serde(default)]
    pub total_billable_hours: f64,
    #[serde(default)]
    pub total_monthly_amount: f64,
    #[serde(default)]
    pub average_allocation_percentage: f64,
    #[serde(default)]
    pub average_billable_percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Response of `GET /allocation-reports/generate`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    #[serde(default)]
    pub report_type: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub reporting_period: Option<ReportingPeriod>,
    #[serde(default)]
    pub resources: Vec<ReportRow>,
    #[serde(default)]
    pub summary: ReportSummary,
}

// =============================================================================
// UPLOADS
// =============================================================================

/// Resume parse result from `POST /documents/upload/resume`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeUploadResponse {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub parsed: serde_json::Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateInfo {
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub valid: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateUploadResponse {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub certificate: CertificateInfo,
}

/// Project fields extracted from an RFP document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RfpProject {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RfpUploadResponse {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub project: RfpProject,
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

fn full_percent() -> i32 {
    100
}

fn deserialize_percent<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(full_percent()),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return i32::try_from(int).map_err(|_| D::Error::custom(format!("percentage {int} out of range")));
            }
            #[allow(clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.abs() <= f64::from(i32::MAX)
            {
                return Ok(float.round() as i32);
            }
            Err(D::Error::custom("expected percentage-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
